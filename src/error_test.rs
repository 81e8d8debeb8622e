use super::*;

#[test]
fn display_includes_offending_name() {
    let err = ChatError::NameTaken { name: "alice".into() };
    assert_eq!(err.to_string(), "name already taken: alice");

    let err = ChatError::AlreadyConnected { name: "bob".into() };
    assert_eq!(err.to_string(), "already connected as bob");
}

#[test]
fn display_for_unit_variants() {
    assert_eq!(ChatError::NotConnected.to_string(), "not connected");
    assert_eq!(ChatError::EmptyMessage.to_string(), "message must not be empty");
    assert_eq!(ChatError::EmptyName.to_string(), "name must not be empty");
}
