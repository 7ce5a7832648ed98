use thiserror::Error;

/// Raised synchronously by [`crate::Draggable::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("drag target is not a drawable surface")]
    InvalidTarget,
    #[error("invalid value {value} for `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// An operation was attempted in a state that cannot support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("container has no measured size along the drag axis")]
    NotMeasured,
    #[error("draggable has been disposed")]
    Disposed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = ConfigurationError::InvalidParameter {
            name: "friction",
            value: 2.0,
            reason: "must be within [0, 1]",
        };
        assert_eq!(
            err.to_string(),
            "invalid value 2 for `friction`: must be within [0, 1]"
        );
        assert_eq!(
            StateError::NotMeasured.to_string(),
            "container has no measured size along the drag axis"
        );
    }
}
