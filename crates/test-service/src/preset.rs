use serde::{Deserialize, Serialize};

/// How the fake service replies to one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Preset {
    /// Resolve with this answer.
    #[serde(rename = "answer")]
    Answer(String),
    /// Fail with this reason.
    #[serde(rename = "failure")]
    Failure(String),
}

impl Preset {
    /// Creates an [`Preset::Answer`].
    #[inline]
    pub fn answer<S: Into<String>>(answer: S) -> Self {
        Self::Answer(answer.into())
    }

    /// Creates a [`Preset::Failure`].
    #[inline]
    pub fn failure<S: Into<String>>(reason: S) -> Self {
        Self::Failure(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let script = vec![
            Preset::answer("Retrieval-Augmented Generation"),
            Preset::failure("connection refused"),
        ];

        let value = serde_json::to_value(&script).unwrap();
        assert_eq!(
            value,
            json!([
                { "type": "answer", "data": "Retrieval-Augmented Generation" },
                { "type": "failure", "data": "connection refused" },
            ])
        );

        let deserialized: Vec<Preset> = serde_json::from_value(value).unwrap();
        assert_eq!(script, deserialized);
    }
}
