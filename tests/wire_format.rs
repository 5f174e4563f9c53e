use marksheet::model::StudentRecord;
use serde_json::json;

#[test]
fn record_serializes_null_for_unknown_marks() {
    let record = StudentRecord {
        name: "class7.csv".to_string(),
        standard: "N/A".to_string(),
        marks: vec![None, Some(42), None, None, None, None],
    };
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "class7.csv",
            "standard": "N/A",
            "marks": [null, 42, null, null, null, null],
        })
    );
}

#[test]
fn fetch_payload_tolerates_store_side_fields() {
    // The store annotates rows with its own id; anything beyond the record
    // fields is ignored.
    let payload = json!([
        {
            "_id": "64f1c0ffee",
            "name": "Asha",
            "standard": "7",
            "marks": [1, 2, 3, 4, 5, 6],
        },
        {
            "_id": "64f1c0ffef",
            "name": "class7.csv",
            "standard": "N/A",
            "marks": [null, null, null, null, null, null],
        }
    ]);
    let records: Vec<StudentRecord> = serde_json::from_value(payload).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].marks, vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]);
    assert_eq!(records[1].total(), None);
    assert_eq!(records[0].total(), Some(21));
}
