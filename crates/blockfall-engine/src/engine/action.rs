use serde::{Deserialize, Serialize};

/// Primitive action applied to the playfield.
///
/// Each variant maps 1:1 to a [`GameField`](super::GameField) mutation, and
/// the serialized names match the host's wire vocabulary (`moveLeft`,
/// `hardDrop`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Shift one column left.
    MoveLeft,
    /// Shift one column right.
    MoveRight,
    /// Rotate 90 degrees clockwise, with a re-centering retry on collision.
    Rotate,
    /// Lower one row; locks the piece on contact.
    SoftDrop,
    /// Drop straight to rest and lock.
    HardDrop,
    /// Swap the falling piece with the held one.
    Hold,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_camel_case() {
        let test_cases = vec![
            (Action::MoveLeft, "\"moveLeft\""),
            (Action::MoveRight, "\"moveRight\""),
            (Action::Rotate, "\"rotate\""),
            (Action::SoftDrop, "\"softDrop\""),
            (Action::HardDrop, "\"hardDrop\""),
            (Action::Hold, "\"hold\""),
        ];

        for (action, expected) in test_cases {
            assert_eq!(serde_json::to_string(&action).unwrap(), expected);
            let roundtrip: Action = serde_json::from_str(expected).unwrap();
            assert_eq!(roundtrip, action);
        }
    }
}
