mod common;
use common::*;

#[test]
fn test_array_literal_and_index() {
    assert_eq!(run("a = [1, 2, 3]; puts a[0] + a[2];"), "4\n");
    assert_eq!(run("puts [];"), "[]\n");
    assert_eq!(run(r#"puts [1, "x", 2.5];"#), "[1, \"x\", 2.5]\n");
}

#[test]
fn test_nested_arrays() {
    assert_eq!(run("puts [[1, 2], [3]][0][1];"), "2\n");
    assert_eq!(run("m = [[1, 2], [3, 4]]; puts m[1];"), "[3, 4]\n");
}

#[test]
fn test_array_operators() {
    assert_eq!(run("puts [1] + [2];"), "[1, 2]\n");
    assert_eq!(run("puts [0] * 3;"), "[0, 0, 0]\n");
    assert_eq!(run("puts [1, 2] == [1, 2];"), "1\n");
}

#[test]
fn test_index_out_of_range() {
    assert_eq!(run("a = [1]; puts a[1];"), "INDEX OUT OF RANGE IN 11\n");
    assert!(run("puts [1][-1];").starts_with("INDEX OUT OF RANGE"));
    assert!(run(r#"puts [1]["0"];"#).starts_with("TYPE MISMATCH"));
}

#[test]
fn test_array_elements_evaluate_in_order() {
    let s = "i = 0; a = [i = i + 1, i = i + 1, i]; puts a;";
    assert_eq!(run(s), "[1, 2, 2]\n");
}
