//! The three extraction visitors.
//!
//! - `EntryVisitor` sees only the module root. It builds the file group and
//!   hands the module body to a `FileVisitor`.
//! - `FileVisitor` scans the whole body for type declarations. Each one gets
//!   its own `TypeVisitor`, whose result is collected before scanning goes on.
//! - `TypeVisitor` records annotated members of one declaration and does not
//!   descend any further.

use swc_common::{BytePos, SourceMap, Span, Spanned, errors::SourceMapper};
use swc_ecma_ast::{
    AutoAccessor, Class, ClassDecl, ClassExpr, ClassMethod, ClassProp, Constructor, Decl,
    DefaultDecl, ExportDecl, ExportDefaultDecl, Ident, Module, ModuleDecl, ModuleItem, Pat,
    PrivateMethod, PrivateProp, StaticBlock, Stmt, TsCallSignatureDecl, TsConstructSignatureDecl,
    TsConstructorType, TsEntityName, TsFnParam, TsFnType, TsGetterSignature, TsIndexSignature,
    TsInterfaceDecl, TsMappedType, TsMethodSignature, TsPropertySignature, TsSetterSignature,
    TsType, TsTypeAliasDecl, TsTypeAnn,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::doc_block::{comment_literal, doc_block, file_doc_block};
use crate::core::{
    annotation::{FieldInfo, FileInfo, Group, TypeInfo},
    nodes::{FileNode, MemberKind, MemberNode, Param, TypeExpr, TypeKind, TypeNode},
    parsers::typescript::ExtractedComments,
};

/// Read-only view of one parsed file shared by all visitors.
#[derive(Clone, Copy)]
pub struct SourceView<'a> {
    pub source_map: &'a SourceMap,
    pub comments: &'a ExtractedComments,
}

impl SourceView<'_> {
    fn line(&self, pos: BytePos) -> usize {
        self.source_map.lookup_char_pos(pos).line
    }

    fn snippet(&self, span: Span) -> String {
        self.source_map.span_to_snippet(span).unwrap_or_default()
    }

    /// Doc comment literals of the node whose first token starts at `pos`.
    fn doc_comments(&self, pos: BytePos) -> Vec<String> {
        doc_block(self.comments.leading_at(pos), self.line(pos), self.source_map)
            .iter()
            .map(comment_literal)
            .collect()
    }

    fn type_expr(&self, ty: &TsType) -> TypeExpr {
        if let TsType::TsTypeRef(type_ref) = ty
            && let TsEntityName::Ident(ident) = &type_ref.type_name
        {
            let args = type_ref
                .type_params
                .as_ref()
                .map(|params| params.params.iter().map(|t| self.type_expr(t)).collect())
                .unwrap_or_default();
            return TypeExpr::Named {
                name: ident.sym.to_string(),
                args,
            };
        }
        TypeExpr::Other(self.snippet(ty.span()))
    }

    fn type_ann(&self, ann: Option<&TsTypeAnn>) -> Option<TypeExpr> {
        ann.map(|ann| self.type_expr(&ann.type_ann))
    }

    fn pat_param(&self, pat: &Pat) -> Param {
        match pat {
            Pat::Ident(binding) => Param {
                name: binding.id.sym.to_string(),
                type_expr: self.type_ann(binding.type_ann.as_deref()),
            },
            Pat::Assign(assign) => self.pat_param(&assign.left),
            other => Param {
                name: self.snippet(other.span()),
                type_expr: None,
            },
        }
    }

    fn ts_fn_param(&self, param: &TsFnParam) -> Param {
        let (name, type_ann) = match param {
            TsFnParam::Ident(binding) => (binding.id.sym.to_string(), binding.type_ann.as_deref()),
            TsFnParam::Array(pat) => (self.snippet(pat.span), pat.type_ann.as_deref()),
            TsFnParam::Rest(pat) => (self.snippet(pat.arg.span()), pat.type_ann.as_deref()),
            TsFnParam::Object(pat) => (self.snippet(pat.span), pat.type_ann.as_deref()),
        };
        Param {
            name,
            type_expr: self.type_ann(type_ann),
        }
    }
}

// ============================================================
// Entry
// ============================================================

pub struct EntryVisitor<'a> {
    view: SourceView<'a>,
    path: &'a str,
    file: Option<FileInfo>,
}

impl<'a> EntryVisitor<'a> {
    pub fn new(view: SourceView<'a>, path: &'a str) -> Self {
        Self {
            view,
            path,
            file: None,
        }
    }

    /// The extracted file. Empty if no module was visited.
    pub fn finish(self) -> FileInfo {
        self.file.unwrap_or_else(|| FileInfo {
            group: Group::new(FileNode::new(self.path), Vec::new()),
            types: Vec::new(),
        })
    }
}

impl Visit for EntryVisitor<'_> {
    fn visit_module(&mut self, node: &Module) {
        let (comments, first_decl_line) = match node.body.first() {
            Some(item) => {
                let pos = item.span().lo;
                let line = is_type_decl(item).then(|| self.view.line(pos));
                (self.view.comments.leading_at(pos), line)
            }
            None => (self.view.comments.first_leading(), None),
        };
        let doc = file_doc_block(comments, first_decl_line, self.view.source_map)
            .iter()
            .map(comment_literal);
        let group = Group::from_comments(FileNode::new(self.path), doc);

        let mut types = FileVisitor::new(self.view);
        node.visit_children_with(&mut types);

        self.file = Some(FileInfo {
            group,
            types: types.types,
        });
    }
}

/// Whether `FileVisitor` records `item` as a type declaration.
fn is_type_decl(item: &ModuleItem) -> bool {
    let is_type = |decl: &Decl| {
        matches!(
            decl,
            Decl::TsInterface(_) | Decl::TsTypeAlias(_) | Decl::Class(_)
        )
    };
    match item {
        ModuleItem::Stmt(Stmt::Decl(decl)) => is_type(decl),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => is_type(&export.decl),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => matches!(
            &export.decl,
            DefaultDecl::TsInterfaceDecl(_) | DefaultDecl::Class(ClassExpr { ident: Some(_), .. })
        ),
        _ => false,
    }
}

// ============================================================
// File: type declarations
// ============================================================

struct FileVisitor<'a> {
    view: SourceView<'a>,
    types: Vec<TypeInfo>,
}

impl<'a> FileVisitor<'a> {
    fn new(view: SourceView<'a>) -> Self {
        Self {
            view,
            types: Vec::new(),
        }
    }

    /// Record one type declaration. `doc_pos` is where its doc comments are
    /// attached, which is the `export` keyword for exported declarations.
    fn record(
        &mut self,
        id: &Ident,
        kind: TypeKind,
        doc_pos: BytePos,
        walk: impl FnOnce(&mut TypeVisitor<'a>),
    ) {
        let node = TypeNode {
            name: id.sym.to_string(),
            kind,
            line: self.view.line(doc_pos),
        };
        let group = Group::from_comments(node, self.view.doc_comments(doc_pos));

        let mut fields = TypeVisitor::new(self.view);
        walk(&mut fields);

        tracing::trace!(
            name = %group.node().name,
            annotations = group.len(),
            fields = fields.fields.len(),
            "type declaration"
        );
        self.types.push(TypeInfo {
            group,
            fields: fields.fields,
        });
    }

    fn record_interface(&mut self, decl: &TsInterfaceDecl, doc_pos: BytePos) {
        self.record(&decl.id, TypeKind::Interface, doc_pos, |v| {
            for member in &decl.body.body {
                member.visit_with(v);
            }
        });
    }

    fn record_type_alias(&mut self, decl: &TsTypeAliasDecl, doc_pos: BytePos) {
        self.record(&decl.id, TypeKind::TypeAlias, doc_pos, |v| {
            let ty: &TsType = &decl.type_ann;
            ty.visit_with(v);
        });
    }

    fn record_class(&mut self, id: &Ident, class: &Class, doc_pos: BytePos) {
        self.record(id, TypeKind::Class, doc_pos, |v| {
            for member in &class.body {
                member.visit_with(v);
            }
        });
    }

    /// Returns false when `decl` is not a type declaration.
    fn record_decl(&mut self, decl: &Decl, doc_pos: BytePos) -> bool {
        match decl {
            Decl::TsInterface(decl) => self.record_interface(decl, doc_pos),
            Decl::TsTypeAlias(decl) => self.record_type_alias(decl, doc_pos),
            Decl::Class(decl) => self.record_class(&decl.ident, &decl.class, doc_pos),
            _ => return false,
        }
        true
    }
}

impl Visit for FileVisitor<'_> {
    fn visit_export_decl(&mut self, node: &ExportDecl) {
        if !self.record_decl(&node.decl, node.span.lo) {
            node.visit_children_with(self);
        }
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        match &node.decl {
            DefaultDecl::TsInterfaceDecl(decl) => self.record_interface(decl, node.span.lo),
            DefaultDecl::Class(ClassExpr {
                ident: Some(ident),
                class,
                ..
            }) => self.record_class(ident, class, node.span.lo),
            _ => node.visit_children_with(self),
        }
    }

    fn visit_decl(&mut self, node: &Decl) {
        if !self.record_decl(node, node.span().lo) {
            node.visit_children_with(self);
        }
    }
}

// ============================================================
// Type: members
// ============================================================

struct TypeVisitor<'a> {
    view: SourceView<'a>,
    fields: Vec<FieldInfo>,
}

impl<'a> TypeVisitor<'a> {
    fn new(view: SourceView<'a>) -> Self {
        Self {
            view,
            fields: Vec::new(),
        }
    }

    /// Keep the member only if its doc block carries annotations.
    fn record(&mut self, member: MemberNode, doc_pos: BytePos) {
        let group = Group::from_comments(member, self.view.doc_comments(doc_pos));
        if !group.is_empty() {
            self.fields.push(FieldInfo { group });
        }
    }

    fn member(&self, key: Span, kind: MemberKind, optional: bool, pos: BytePos) -> MemberNode {
        MemberNode {
            name: self.view.snippet(key),
            kind,
            optional,
            line: self.view.line(pos),
        }
    }
}

impl Visit for TypeVisitor<'_> {
    fn visit_ts_property_signature(&mut self, node: &TsPropertySignature) {
        let kind = MemberKind::Property {
            type_expr: self.view.type_ann(node.type_ann.as_deref()),
        };
        let member = self.member(node.key.span(), kind, node.optional, node.span.lo);
        self.record(member, node.span.lo);
    }

    fn visit_ts_method_signature(&mut self, node: &TsMethodSignature) {
        let kind = MemberKind::Method {
            params: node.params.iter().map(|p| self.view.ts_fn_param(p)).collect(),
            returns: self.view.type_ann(node.type_ann.as_deref()),
        };
        let member = self.member(node.key.span(), kind, node.optional, node.span.lo);
        self.record(member, node.span.lo);
    }

    fn visit_class_prop(&mut self, node: &ClassProp) {
        let kind = MemberKind::Property {
            type_expr: self.view.type_ann(node.type_ann.as_deref()),
        };
        let member = self.member(node.key.span(), kind, node.is_optional, node.span.lo);
        self.record(member, node.span.lo);
    }

    fn visit_class_method(&mut self, node: &ClassMethod) {
        let function = &node.function;
        let kind = MemberKind::Method {
            params: function
                .params
                .iter()
                .map(|p| self.view.pat_param(&p.pat))
                .collect(),
            returns: self.view.type_ann(function.return_type.as_deref()),
        };
        let member = self.member(node.key.span(), kind, node.is_optional, node.span.lo);
        self.record(member, node.span.lo);
    }

    // Members of nested declarations belong to those declarations.
    fn visit_constructor(&mut self, _: &Constructor) {}
    fn visit_class_decl(&mut self, _: &ClassDecl) {}
    fn visit_class_expr(&mut self, _: &ClassExpr) {}
    fn visit_ts_interface_decl(&mut self, _: &TsInterfaceDecl) {}
    fn visit_ts_type_alias_decl(&mut self, _: &TsTypeAliasDecl) {}
    fn visit_ts_fn_type(&mut self, _: &TsFnType) {}
    fn visit_ts_constructor_type(&mut self, _: &TsConstructorType) {}
    fn visit_ts_mapped_type(&mut self, _: &TsMappedType) {}

    // Members that never become fields. Their parameter and type literals
    // must not leak into the declaration either.
    fn visit_private_method(&mut self, _: &PrivateMethod) {}
    fn visit_private_prop(&mut self, _: &PrivateProp) {}
    fn visit_auto_accessor(&mut self, _: &AutoAccessor) {}
    fn visit_static_block(&mut self, _: &StaticBlock) {}
    fn visit_ts_call_signature_decl(&mut self, _: &TsCallSignatureDecl) {}
    fn visit_ts_construct_signature_decl(&mut self, _: &TsConstructSignatureDecl) {}
    fn visit_ts_index_signature(&mut self, _: &TsIndexSignature) {}
    fn visit_ts_getter_signature(&mut self, _: &TsGetterSignature) {}
    fn visit_ts_setter_signature(&mut self, _: &TsSetterSignature) {}
}
