use std::fmt;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(UserId);
define_id!(SurfaceId);
define_id!(SessionId);

impl UserId {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_mention_wraps_id() {
        assert_eq!(UserId::new("42").mention(), "<@42>");
    }

    #[test]
    fn test_ids_of_different_kinds_keep_their_text() {
        let surface = SurfaceId::from("surface-1");
        let session: SessionId = "swift-falcon-0001".to_string().into();

        assert_eq!(surface.as_str(), "surface-1");
        assert_eq!(session.to_string(), "swift-falcon-0001");
        assert_eq!(String::from(surface), "surface-1");
    }
}
