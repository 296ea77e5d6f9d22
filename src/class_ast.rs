#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    AbstractClass,
    Interface,
    Enum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub kind: ClassKind,
    pub name: String,
    pub stereotype: Option<String>,
    pub attributes: Vec<String>,
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Inheritance,
    Implements,
    Composition,
    Aggregation,
    Association,
    Dependency,
}

/// A relation with its edge direction already normalized: inheritance and
/// implementation point from child to parent.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDecl {
    pub from: String,
    pub to: String,
    pub kind: RelationKind,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassDiagram {
    pub classes: Vec<ClassDecl>,
    pub relations: Vec<RelationDecl>,
}
