//! Tests for setup error types.

use gridview::GridError;

#[test]
fn test_error_display() {
    assert_eq!(
        GridError::duplicate_column("city").to_string(),
        "column 'city' is registered more than once"
    );
    assert_eq!(
        GridError::missing_accessor("label").to_string(),
        "column 'label' has neither a field accessor nor a derivation"
    );
    assert_eq!(
        GridError::page_size_not_allowed(7, &[10, 20]).to_string(),
        "page size 7 is not one of the allowed sizes [10, 20]"
    );
}
