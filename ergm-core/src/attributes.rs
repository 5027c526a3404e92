//! Per-node attribute tables used by attribute-dependent change statistics.

/// Optional binary and categorical per-node attribute vectors.
///
/// A missing table means "no such attribute": statistics that read it must
/// not be bound unless the corresponding table is present (see
/// [`crate::error::ErgmError::MissingAttribute`]).
///
/// # Examples
/// ```
/// use ergm_core::AttributeTable;
///
/// let attrs = AttributeTable::new().with_binary("gender", vec![0, 1, 1]);
/// assert_eq!(attrs.binary(), Some([0, 1, 1].as_slice()));
/// assert_eq!(attrs.binary_name(), Some("gender"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AttributeTable {
    binary: Option<Vec<u8>>,
    binary_name: Option<String>,
    categorical: Option<Vec<i64>>,
    categorical_name: Option<String>,
}

impl AttributeTable {
    /// Creates an attribute table with neither binary nor categorical data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a binary attribute vector and its preserved name.
    #[must_use]
    pub fn with_binary(mut self, name: impl Into<String>, values: Vec<u8>) -> Self {
        self.binary_name = Some(name.into());
        self.binary = Some(values);
        self
    }

    /// Attaches a categorical attribute vector and its preserved name.
    #[must_use]
    pub fn with_categorical(mut self, name: impl Into<String>, values: Vec<i64>) -> Self {
        self.categorical_name = Some(name.into());
        self.categorical = Some(values);
        self
    }

    /// The binary attribute vector, if loaded.
    #[must_use]
    pub fn binary(&self) -> Option<&[u8]> {
        self.binary.as_deref()
    }

    /// The preserved name of the binary attribute, if loaded.
    #[must_use]
    pub fn binary_name(&self) -> Option<&str> {
        self.binary_name.as_deref()
    }

    /// The categorical attribute vector, if loaded.
    #[must_use]
    pub fn categorical(&self) -> Option<&[i64]> {
        self.categorical.as_deref()
    }

    /// The preserved name of the categorical attribute, if loaded.
    #[must_use]
    pub fn categorical_name(&self) -> Option<&str> {
        self.categorical_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::AttributeTable;

    #[test]
    fn empty_table_has_no_attributes() {
        let attrs = AttributeTable::new();
        assert!(attrs.binary().is_none());
        assert!(attrs.categorical().is_none());
    }

    #[test]
    fn builder_preserves_names_and_values() {
        let attrs = AttributeTable::new()
            .with_binary("smoker", vec![1, 0])
            .with_categorical("region", vec![2, 5]);
        assert_eq!(attrs.binary(), Some([1, 0].as_slice()));
        assert_eq!(attrs.binary_name(), Some("smoker"));
        assert_eq!(attrs.categorical(), Some([2, 5].as_slice()));
        assert_eq!(attrs.categorical_name(), Some("region"));
    }
}
