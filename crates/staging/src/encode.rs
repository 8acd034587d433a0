//! Categorical encoding

use customernexus_core::{Error, Result};

/// Maps each distinct category to its index in sorted order
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Learn the sorted set of distinct values
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = values.into_iter().map(str::to_string).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// 0-based class index of `value`
    pub fn transform(&self, value: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .map_err(|_| {
                Error::invalid_input(format!(
                    "'{value}' was not seen when fitting the encoder (classes: {:?})",
                    self.classes
                ))
            })
    }

    /// 1-based code, the form stored on the graph
    pub fn code(&self, value: &str) -> Result<i64> {
        Ok(self.transform(value)? as i64 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_sorted_and_distinct() {
        let encoder = LabelEncoder::fit(["M", "F", "M", "F", "F"]);
        assert_eq!(encoder.classes(), &["F".to_string(), "M".to_string()]);
    }

    #[test]
    fn test_codes_are_one_based() {
        let encoder = LabelEncoder::fit(["Male", "Female"]);
        assert_eq!(encoder.transform("Female").unwrap(), 0);
        assert_eq!(encoder.code("Female").unwrap(), 1);
        assert_eq!(encoder.code("Male").unwrap(), 2);
    }

    #[test]
    fn test_unseen_value_is_an_error() {
        let encoder = LabelEncoder::fit(["F", "M"]);
        assert!(encoder.code("X").is_err());
    }
}
