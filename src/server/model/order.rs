use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// fields a create request must carry, and the only ones an update may change
const ORDER_FIELDS: [&str; 3] = ["udid", "status", "date"];

/// A persisted order record.
///
/// Records are kept as loaded: a record of unexpected shape is carried along
/// untouched instead of making the whole collection unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Order(Value);

/// Body of both create and update requests
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub(crate) struct OrderPayload(Map<String, Value>);

/// A validated create request, waiting for its id
#[derive(Debug)]
pub(crate) struct NewOrder(Map<String, Value>);

impl OrderPayload {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `None` unless `udid`, `status` and `date` are all present
    pub fn into_new_order(self) -> Option<NewOrder> {
        ORDER_FIELDS
            .iter()
            .all(|field| self.0.contains_key(*field))
            .then_some(NewOrder(self.0))
    }
}

impl NewOrder {
    /// Every submitted member is kept, `id` is always the assigned one.
    pub fn with_id(self, id: i64) -> Order {
        let mut fields = self.0;
        fields.insert("id".to_string(), Value::from(id));
        Order(Value::Object(fields))
    }
}

impl Order {
    /// `None` when the record carries no integer id
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Overwrite `udid`, `status` and `date` with whatever the patch carries.
    pub fn apply(&mut self, patch: &OrderPayload) {
        let Some(fields) = self.0.as_object_mut() else {
            return;
        };
        for field in ORDER_FIELDS {
            if let Some(value) = patch.0.get(field) {
                fields.insert(field.to_string(), value.clone());
            }
        }
    }
}

impl From<Value> for Order {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// 1 + the highest id in the collection, 1 for an empty one.
/// Records without an integer id count as 0.
pub(crate) fn next_id(orders: &[Order]) -> i64 {
    orders
        .iter()
        .map(|o| o.id().unwrap_or(0))
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> OrderPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn next_id_follows_maximum() {
        assert_eq!(next_id(&[]), 1);
        let orders = [Order::from(json!({"id": 3})), Order::from(json!({"id": 1}))];
        assert_eq!(next_id(&orders), 4);
        assert_eq!(next_id(&[Order::from(json!({"id": 0}))]), 1);
    }

    #[test]
    fn loosely_typed_records_still_count() {
        let orders: Vec<Order> = serde_json::from_value(json!([
            {"id": 4, "udid": 12345, "status": "open"},
            {"udid": "A", "status": "open", "date": "2024-01-01"},
            "not an object"
        ]))
        .unwrap();
        assert_eq!(orders[0].id(), Some(4));
        assert_eq!(orders[1].id(), None);
        assert_eq!(orders[2].id(), None);
        assert_eq!(next_id(&orders), 5);
    }

    #[test]
    fn new_order_requires_all_fields() {
        assert!(payload(json!({"udid": "U1"})).into_new_order().is_none());
        assert!(payload(json!({"udid": "U1", "status": "new"})).into_new_order().is_none());

        let created = payload(json!({
            "udid": "U1", "status": "new", "date": "2024-01-01", "note": "rush", "id": 42
        }))
        .into_new_order()
        .unwrap()
        .with_id(7);
        assert_eq!(created.id(), Some(7));
        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            json!({"id": 7, "udid": "U1", "status": "new", "date": "2024-01-01", "note": "rush"})
        );
    }

    #[test]
    fn presence_is_enough_on_create() {
        let created = payload(json!({"udid": 12, "status": null, "date": "2024-01-01"}))
            .into_new_order()
            .unwrap()
            .with_id(1);
        assert_eq!(created.get("udid"), Some(&json!(12)));
        assert_eq!(created.get("status"), Some(&Value::Null));
    }

    #[test]
    fn apply_keeps_unspecified_fields() {
        let mut existing =
            Order::from(json!({"id": 1, "udid": "A", "status": "open", "date": "2024-01-01"}));
        existing.apply(&payload(json!({"status": "closed", "id": 9, "note": "x"})));
        assert_eq!(
            existing,
            Order::from(json!({"id": 1, "udid": "A", "status": "closed", "date": "2024-01-01"}))
        );
    }

    #[test]
    fn apply_writes_explicit_null() {
        let mut existing =
            Order::from(json!({"id": 1, "udid": "A", "status": "open", "date": "2024-01-01"}));
        existing.apply(&payload(json!({"udid": null})));
        assert_eq!(existing.get("udid"), Some(&Value::Null));
        assert_eq!(existing.get("status"), Some(&json!("open")));
    }

    #[test]
    fn empty_payload() {
        assert!(payload(json!({})).is_empty());
        assert!(!payload(json!({"note": 1})).is_empty());
        assert!(!payload(json!({"udid": null})).is_empty());
    }
}
