use serde::{ser::SerializeMap, Serialize, Serializer};

use super::components::DataInstance;

#[derive(Debug, PartialEq, Clone)]
pub struct Row(pub Vec<DataInstance>);

impl Row {
    pub fn get(&self, position: usize) -> &DataInstance {
        self.0.get(position).unwrap_or(&DataInstance::Null)
    }
}

impl From<Vec<DataInstance>> for Row {
    fn from(values: Vec<DataInstance>) -> Self {
        Row(values)
    }
}

/// Build a `Row` from heterogeneous values, each converted with `DataInstance::from`.
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::constructs::rows::Row(vec![$($crate::constructs::components::DataInstance::from($value)),*])
    };
}

/// Row paired with its column names, serialized as a map.
pub struct NamedRow<'a>(pub &'a [String], pub &'a [DataInstance]);

impl Serialize for NamedRow<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0.iter().zip(self.1.iter()) {
            state.serialize_entry(name, value)?;
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn named_row_serializes_as_map() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let row = crate::row!["x", DataInstance::Null];
        assert_eq!(
            serde_json::to_string(&NamedRow(&columns, &row.0)).unwrap(),
            r#"{"a":"x","b":null}"#
        );
    }
}
