use serde::{Deserialize, Deserializer};

/// A field of a partial update.
///
/// `Unchanged` leaves the stored value alone, `Set` overwrites it. For nullable
/// columns use `Patch<Option<T>>`, so that `Set(None)` clears the value while
/// `Unchanged` keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unchanged,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T> Patch<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Patch::Set(_))
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Unchanged => Patch::Unchanged,
            Patch::Set(value) => Patch::Set(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Unchanged => Patch::Unchanged,
            Patch::Set(value) => Patch::Set(f(value)),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Unchanged => None,
            Patch::Set(value) => Some(value),
        }
    }

    /// Writes the value into `target` if it is set.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Set(value) = self {
            *target = value;
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Set(value),
            None => Patch::Unchanged,
        }
    }
}

// Only called when the field is present; pair with `#[serde(default)]`.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Patch::Set)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default)]
        image: Patch<Option<String>>,
    }

    #[test]
    fn missing_field_is_unchanged() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.image, Patch::Unchanged);
    }

    #[test]
    fn null_field_clears_value() {
        let body: Body = serde_json::from_str(r#"{"image": null}"#).unwrap();
        assert_eq!(body.image, Patch::Set(None));
    }

    #[test]
    fn present_field_is_set() {
        let body: Body = serde_json::from_str(r#"{"image": "https://img"}"#).unwrap();
        assert_eq!(body.image, Patch::Set(Some("https://img".to_string())));
    }

    #[test]
    fn apply_to_keeps_value_when_unchanged() {
        let mut bio = "old".to_string();
        Patch::Unchanged.apply_to(&mut bio);
        assert_eq!(bio, "old");
        Patch::Set("new".to_string()).apply_to(&mut bio);
        assert_eq!(bio, "new");
    }
}
