//! Append-only execution log.
//!
//! One record per operator that reached the commit step. Records are
//! hash-chained: each `record_id` commits to the record's content and to
//! the id of the record before it, so [`ExecutionLog::verify_chain`]
//! detects any edit to history.

use crate::invariants::Deltas;
use crate::witness::compute_record_id;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    /// Position in the log, from 0.
    pub sequence: usize,

    /// Operator name.
    pub operator: String,

    /// Operator construction parameters.
    pub parameters: Value,

    /// The committed algebraic effect.
    pub deltas: Deltas,

    /// Whether direct measurement replaced the algebraic result.
    pub reconciled: bool,

    /// Chained content id.
    pub record_id: String,
}

impl ExecutionRecord {
    fn body(&self) -> Map<String, Value> {
        record_body(
            self.sequence,
            &self.operator,
            &self.parameters,
            &self.deltas,
            self.reconciled,
        )
    }
}

fn record_body(
    sequence: usize,
    operator: &str,
    parameters: &Value,
    deltas: &Deltas,
    reconciled: bool,
) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("sequence".to_string(), Value::from(sequence));
    body.insert("operator".to_string(), Value::String(operator.to_string()));
    body.insert("parameters".to_string(), parameters.clone());
    body.insert(
        "deltas".to_string(),
        serde_json::to_value(deltas).unwrap_or(Value::Null),
    );
    body.insert("reconciled".to_string(), Value::Bool(reconciled));
    body
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExecutionLog {
    records: Vec<ExecutionRecord>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, assigning its sequence number and chained id.
    pub fn append(
        &mut self,
        operator: impl Into<String>,
        parameters: Value,
        deltas: Deltas,
        reconciled: bool,
    ) -> &ExecutionRecord {
        let sequence = self.records.len();
        let operator = operator.into();
        let prev = self.records.last().map(|r| r.record_id.as_str());
        let body = record_body(sequence, &operator, &parameters, &deltas, reconciled);
        let record_id = compute_record_id(prev, &body);

        self.records.push(ExecutionRecord {
            sequence,
            operator,
            parameters,
            deltas,
            reconciled,
            record_id,
        });
        &self.records[sequence]
    }

    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&ExecutionRecord> {
        self.records.last()
    }

    /// Id of the newest record, or `None` for an empty log.
    pub fn head(&self) -> Option<&str> {
        self.last().map(|r| r.record_id.as_str())
    }

    /// Recompute every record id and sequence number.
    ///
    /// Returns the sequence of the first record that does not match, or
    /// `Ok(())` if the whole chain is intact.
    pub fn verify_chain(&self) -> Result<(), usize> {
        let mut prev: Option<&str> = None;
        for (position, record) in self.records.iter().enumerate() {
            if record.sequence != position
                || compute_record_id(prev, &record.body()) != record.record_id
            {
                return Err(position);
            }
            prev = Some(record.record_id.as_str());
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ExecutionLog {
    type Item = &'a ExecutionRecord;
    type IntoIter = std::slice::Iter<'a, ExecutionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
