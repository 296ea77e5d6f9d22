use winnow::prelude::*;
use winnow::ascii::{Caseless, line_ending, space0, space1};
use winnow::combinator::{alt, opt, preceded, repeat};
use winnow::token::{take_until, take_while};

use crate::class_ast::*;
use crate::error::{Error, Result};

/// Parses class blocks and relation lines.
pub fn parse_class_diagram(input: &str) -> Result<ClassDiagram> {
    let mut input = input;
    let parsed = class_diagram(&mut input);
    match parsed {
        Ok(diagram) if input.trim().is_empty() => Ok(diagram),
        _ => Err(syntax_error(input)),
    }
}

fn syntax_error(rest: &str) -> Error {
    let context = rest.trim_start().lines().next().unwrap_or("").trim();
    let context_display = if context.chars().count() > 40 {
        format!("{}...", context.chars().take(40).collect::<String>())
    } else {
        context.to_string()
    };
    Error::Parse {
        message: format!("syntax error in class diagram: unexpected `{context_display}`"),
    }
}

#[derive(Debug)]
enum ClassLine {
    Class(ClassDecl),
    Relation(RelationDecl),
}

fn class_diagram(input: &mut &str) -> winnow::Result<ClassDiagram> {
    let lines: Vec<Option<ClassLine>> = repeat(0.., class_line).parse_next(input)?;
    let mut diagram = ClassDiagram::default();
    for line in lines.into_iter().flatten() {
        match line {
            ClassLine::Class(decl) => diagram.classes.push(decl),
            ClassLine::Relation(rel) => diagram.relations.push(rel),
        }
    }
    Ok(diagram)
}

fn class_line(input: &mut &str) -> winnow::Result<Option<ClassLine>> {
    space0.parse_next(input)?;

    if input.is_empty() {
        return Err(winnow::error::ParserError::from_input(input));
    }

    alt((
        blank_line.map(|_| None),
        comment_line.map(|_| None),
        block_comment.map(|_| None),
        directive_line.map(|_| None),
        class_block.map(|c| Some(ClassLine::Class(c))),
        relation_line.map(|r| Some(ClassLine::Relation(r))),
    ))
    .parse_next(input)
}

fn blank_line(input: &mut &str) -> winnow::Result<()> {
    line_ending.void().parse_next(input)
}

fn rest_of_line<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    let text = take_while(0.., |c: char| c != '\n').parse_next(input)?;
    opt(line_ending).parse_next(input)?;
    Ok(text)
}

fn comment_line(input: &mut &str) -> winnow::Result<()> {
    "'".parse_next(input)?;
    rest_of_line.void().parse_next(input)
}

fn block_comment(input: &mut &str) -> winnow::Result<()> {
    "/'".parse_next(input)?;
    take_until(0.., "'/").parse_next(input)?;
    "'/".parse_next(input)?;
    rest_of_line.void().parse_next(input)
}

/// `@startuml` / `@enduml`.
fn directive_line(input: &mut &str) -> winnow::Result<()> {
    "@".parse_next(input)?;
    rest_of_line.void().parse_next(input)
}

fn identifier<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

fn class_kind(input: &mut &str) -> winnow::Result<ClassKind> {
    alt((
        (Caseless("abstract"), space1, Caseless("class")).value(ClassKind::AbstractClass),
        Caseless("class").value(ClassKind::Class),
        Caseless("interface").value(ClassKind::Interface),
        Caseless("enum").value(ClassKind::Enum),
    ))
    .parse_next(input)
}

fn stereotype(input: &mut &str) -> winnow::Result<String> {
    "<<".parse_next(input)?;
    let text = take_until(1.., ">>").parse_next(input)?;
    ">>".parse_next(input)?;
    Ok(text.trim().to_string())
}

fn class_block(input: &mut &str) -> winnow::Result<ClassDecl> {
    let kind = class_kind.parse_next(input)?;
    space1.parse_next(input)?;
    let name = identifier.parse_next(input)?;
    let stereotype = opt(preceded(space0, stereotype)).parse_next(input)?;
    space0.parse_next(input)?;
    "{".parse_next(input)?;
    let header = rest_of_line.parse_next(input)?.trim();

    let mut attributes = Vec::new();
    let mut methods = Vec::new();
    // `class A {}` or `class A { + x: int }` closes on the header line.
    if let Some(inner) = header.strip_suffix('}') {
        push_member(inner.trim(), &mut attributes, &mut methods);
        return Ok(ClassDecl {
            kind,
            name: name.to_string(),
            stereotype,
            attributes,
            methods,
        });
    }

    let mut in_comment = false;
    loop {
        space0.parse_next(input)?;
        if input.is_empty() {
            return Err(winnow::error::ParserError::from_input(input));
        }
        if !in_comment && input.starts_with('}') {
            "}".parse_next(input)?;
            rest_of_line.parse_next(input)?;
            break;
        }
        let line = rest_of_line.parse_next(input)?.trim();
        if in_comment {
            in_comment = !line.ends_with("'/");
            continue;
        }
        if line.starts_with("/'") {
            in_comment = !line.ends_with("'/");
            continue;
        }
        push_member(line, &mut attributes, &mut methods);
    }

    Ok(ClassDecl {
        kind,
        name: name.to_string(),
        stereotype,
        attributes,
        methods,
    })
}

fn push_member(line: &str, attributes: &mut Vec<String>, methods: &mut Vec<String>) {
    if line.is_empty() || line.starts_with('\'') {
        return;
    }
    if line.contains('(') && line.contains(')') {
        methods.push(line.to_string());
    } else {
        attributes.push(line.to_string());
    }
}

/// Arrow token and whether the written left-hand side is the edge target.
fn arrow(input: &mut &str) -> winnow::Result<(RelationKind, bool)> {
    alt((
        "<|--".value((RelationKind::Inheritance, true)),
        "<|..".value((RelationKind::Implements, true)),
        "--|>".value((RelationKind::Inheritance, false)),
        "..|>".value((RelationKind::Implements, false)),
        "*--".value((RelationKind::Composition, false)),
        "o--".value((RelationKind::Aggregation, false)),
        "-->".value((RelationKind::Association, false)),
        "..>".value((RelationKind::Dependency, false)),
    ))
    .parse_next(input)
}

fn relation_label(input: &mut &str) -> winnow::Result<String> {
    (space0, ":", space0).parse_next(input)?;
    let text = take_while(1.., |c: char| c != '\n').parse_next(input)?;
    Ok(text.trim().to_string())
}

fn relation_line(input: &mut &str) -> winnow::Result<RelationDecl> {
    let left = identifier.parse_next(input)?;
    space0.parse_next(input)?;
    let (kind, reversed) = arrow.parse_next(input)?;
    space0.parse_next(input)?;
    let right = identifier.parse_next(input)?;
    let label = opt(relation_label).parse_next(input)?;
    space0.parse_next(input)?;
    opt(line_ending).parse_next(input)?;

    let (from, to) = if reversed { (right, left) } else { (left, right) };
    Ok(RelationDecl {
        from: from.to_string(),
        to: to.to_string(),
        kind,
        label: label.filter(|l| !l.is_empty()),
    })
}
