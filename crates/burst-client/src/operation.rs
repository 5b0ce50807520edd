//! The two request kinds a run can issue

use std::fmt;

/// Remote operation repeated by every invocation of a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// `ListBuckets`, no parameters
    ListBuckets,
    /// `GetObject` on a single object; the body is drained and discarded
    GetObject { bucket: String, key: String },
}

impl Operation {
    /// Pick the operation from optional bucket and key.
    ///
    /// Object-fetch mode needs both values non-empty; anything else lists buckets.
    pub fn select(bucket: Option<&str>, key: Option<&str>) -> Self {
        match (bucket, key) {
            (Some(bucket), Some(key)) if !bucket.is_empty() && !key.is_empty() => {
                Self::GetObject {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                }
            }
            _ => Self::ListBuckets,
        }
    }

    /// SDK operation name
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListBuckets => "ListBuckets",
            Self::GetObject { .. } => "GetObject",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListBuckets => f.write_str("ListBuckets"),
            Self::GetObject { bucket, key } => write!(f, "GetObject({bucket}/{key})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("b"), Some("k"), true)]
    #[case(Some("b"), None, false)]
    #[case(None, Some("k"), false)]
    #[case(Some(""), Some("k"), false)]
    #[case(Some("b"), Some(""), false)]
    #[case(None, None, false)]
    fn test_select(#[case] bucket: Option<&str>, #[case] key: Option<&str>, #[case] fetch: bool) {
        let op = Operation::select(bucket, key);
        assert_eq!(matches!(op, Operation::GetObject { .. }), fetch);
    }

    #[test]
    fn test_select_keeps_names() {
        let op = Operation::select(Some("test"), Some("dir/file.txt"));
        assert_eq!(
            op,
            Operation::GetObject {
                bucket: "test".to_string(),
                key: "dir/file.txt".to_string(),
            }
        );
        assert_eq!(op.name(), "GetObject");
        assert_eq!(op.to_string(), "GetObject(test/dir/file.txt)");
    }

    #[test]
    fn test_list_buckets_display() {
        assert_eq!(Operation::ListBuckets.to_string(), "ListBuckets");
        assert_eq!(Operation::ListBuckets.name(), "ListBuckets");
    }
}
