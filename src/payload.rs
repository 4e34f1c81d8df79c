use crate::error::CrdtError;

/// The replicated state unit: an opaque identity plus type-specific content.
///
/// All replicas of the same logical object carry payloads with the same
/// `id`; two payloads may only be compared or merged when their identities
/// match. Content is a plain value (maps, sets, or nested payloads) and is
/// never mutated in place; update operations return a new payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Payload<C> {
    id: String,
    content: C,
}

impl<C> Payload<C> {
    pub(crate) fn new(id: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    /// Identity of the replicated object this payload belongs to.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The type-specific state.
    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    /// New payload with the same identity and replaced content.
    pub(crate) fn with_content(&self, content: C) -> Self {
        Self {
            id: self.id.clone(),
            content,
        }
    }

    /// Identity guard shared by every `compare` and `merge`.
    pub(crate) fn ensure_same_identity(&self, other: &Self) -> Result<(), CrdtError> {
        if self.id != other.id {
            return Err(CrdtError::IdentityMismatch {
                left: self.id.clone(),
                right: other.id.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrdtError;

    #[test]
    fn identity_guard_accepts_matching_ids() {
        let a = Payload::new("x", 1u8);
        let b = Payload::new("x", 2u8);
        assert!(a.ensure_same_identity(&b).is_ok());
    }

    #[test]
    fn identity_guard_rejects_mismatched_ids() {
        let a = Payload::new("x", 1u8);
        let b = Payload::new("y", 1u8);
        assert_eq!(
            a.ensure_same_identity(&b),
            Err(CrdtError::IdentityMismatch {
                left: "x".into(),
                right: "y".into(),
            })
        );
    }

    #[test]
    fn identity_guard_runs_against_itself() {
        let a = Payload::new("x", 1u8);
        assert!(a.ensure_same_identity(&a).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn payload_round_trips_through_json() {
        let payload = Payload::new("x", vec![1u8, 2, 3]);
        let json = serde_json::to_string(&payload).unwrap();
        let back: Payload<Vec<u8>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
