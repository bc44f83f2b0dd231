use crate::codegen::writer::{CodeWriter, SourceWriter};

#[test]
fn test_writer_indentation() {
    let mut cg = SourceWriter::new();
    cg.begin_block("fn demo()");
    cg.write_line("let x = 1;");
    cg.begin_block("");
    cg.write_line("x;");
    cg.end_block();
    cg.blank_line();
    cg.end_block();
    assert_eq!(
        cg.source(),
        "fn demo() {\n    let x = 1;\n    {\n        x;\n    }\n\n}\n"
    );
}

#[test]
fn test_writer_blank_lines_unindented() {
    let mut cg = SourceWriter::new();
    cg.begin_block("fn demo()");
    cg.blank_line();
    cg.end_block();
    assert_eq!(cg.source(), "fn demo() {\n\n}\n");
}

#[test]
fn test_writer_into_source() {
    let mut cg = SourceWriter::default();
    cg.write_line("alpha");
    assert_eq!(cg.into_source(), "alpha\n");
}
