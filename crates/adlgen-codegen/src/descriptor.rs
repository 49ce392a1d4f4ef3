//! Runtime type descriptors and registration
//!
//! The descriptor file of a module holds, per declaration:
//!
//! - `Texpr_X(...)`: a typed witness of `X`'s type expression, one
//!   `adlast.ATypeExpr` argument per type parameter
//! - `AST_X()`: the declaration's full AST as a Go literal
//! - an `init()` registering the AST (and any custom-type helper) with the
//!   runtime resolver, which decode uses to build structs and union branches

use crate::gofile::GoFile;
use crate::imports::ImportSpec;
use crate::type_params::TypeParamList;
use crate::value::{any_literal, call, string_literal};
use adlgen_core::annotations::custom_type;
use adlgen_core::{Decl, DeclType, Field, GenResult, GoCustomType, Maybe};
use tracing::debug;

impl GoFile<'_> {
    /// Append the descriptor functions and registration for `decl` to `out`.
    pub fn gen_descriptor(&mut self, decl: &Decl, out: &mut String) -> GenResult<()> {
        debug!(decl = %decl.name, "generating descriptor");
        let gct = custom_type(decl)?;
        if !decl.is_generic_typedef() {
            self.gen_texpr_fn(decl, gct.as_ref(), out)?;
        }
        self.gen_ast_fn(decl, out)?;
        self.gen_registration(decl, gct.as_ref(), out)
    }

    fn scoped_name_literal(&mut self, name: &str) -> GenResult<String> {
        let adlast = self.pkg("adlast")?;
        Ok(format!(
            "{adlast}Make_ScopedName({}, {})",
            string_literal(&self.module_name),
            string_literal(name)
        ))
    }

    fn gen_texpr_fn(
        &mut self,
        decl: &Decl,
        gct: Option<&GoCustomType>,
        out: &mut String,
    ) -> GenResult<()> {
        let adlast = self.pkg("adlast")?;
        let (tps, type_name) = match gct {
            Some(gct) => {
                let pkg = self.register_custom_type(gct);
                let tps = TypeParamList::from_names(decl.type_params(), &gct.gotype.type_constraints);
                let type_name = format!("{pkg}.{}{}", gct.gotype.name, tps.rside());
                (tps, type_name)
            }
            None => {
                let tps = TypeParamList::from_decl(decl)?;
                let type_name = format!("{}{}", decl.name, tps.rside());
                (tps, type_name)
            }
        };
        let sn = self.scoped_name_literal(&decl.name)?;
        out.push_str(&format!(
            "func Texpr_{}{}({}) {adlast}ATypeExpr[{type_name}] {{\n",
            decl.name,
            tps.lside(),
            tps.texpr_args()
        ));
        out.push_str(&format!(
            "\tte := {adlast}Make_ATypeExpr[{type_name}]({adlast}Make_TypeExpr({adlast}Make_TypeRef_reference({sn}), []{adlast}TypeExpr{{{}}}))\n",
            tps.texpr_values()
        ));
        out.push_str("\treturn te\n}\n\n");
        Ok(())
    }

    fn gen_ast_fn(&mut self, decl: &Decl, out: &mut String) -> GenResult<()> {
        let adlast = self.pkg("adlast")?;
        let types = self.pkg("types")?;
        let idents = |params: &[String]| {
            let names: Vec<String> = params.iter().map(|p| string_literal(p)).collect();
            format!("[]{adlast}Ident{{{}}}", names.join(", "))
        };

        let decl_type = match &decl.decl_type {
            DeclType::Struct(s) => {
                let fields = self.fields_literal(&s.fields)?;
                call(
                    &format!("{adlast}Make_DeclType_struct_"),
                    &[call(
                        &format!("{adlast}Make_Struct"),
                        &[idents(&s.type_params), fields],
                    )],
                )
            }
            DeclType::Union(u) => {
                let fields = self.fields_literal(&u.fields)?;
                call(
                    &format!("{adlast}Make_DeclType_union_"),
                    &[call(
                        &format!("{adlast}Make_Union"),
                        &[idents(&u.type_params), fields],
                    )],
                )
            }
            DeclType::TypeDef(td) => {
                let te = self.texpr_literal(&td.type_expr)?;
                call(
                    &format!("{adlast}Make_DeclType_type_"),
                    &[call(
                        &format!("{adlast}Make_TypeDef"),
                        &[idents(&td.type_params), te],
                    )],
                )
            }
            DeclType::NewType(nt) => {
                let te = self.texpr_literal(&nt.type_expr)?;
                let default = self.maybe_any(&nt.default)?;
                call(
                    &format!("{adlast}Make_DeclType_newtype_"),
                    &[call(
                        &format!("{adlast}Make_NewType"),
                        &[idents(&nt.type_params), te, default],
                    )],
                )
            }
        };
        let version = match decl.version {
            Maybe::Nothing => format!("{types}Make_Maybe_nothing[uint32]()"),
            Maybe::Just(v) => format!("{types}Make_Maybe_just[uint32]({v})"),
        };
        let annotations = self.annotations_literal(&decl.annotations)?;
        let decl_lit = call(
            &format!("{adlast}Make_Decl"),
            &[string_literal(&decl.name), version, decl_type, annotations],
        );
        out.push_str(&format!(
            "func AST_{}() {adlast}ScopedDecl {{\n\tdecl := {decl_lit}\n\treturn {adlast}Make_ScopedDecl({}, decl)\n}}\n\n",
            decl.name,
            string_literal(&self.module_name)
        ));
        Ok(())
    }

    fn fields_literal(&mut self, fields: &[Field]) -> GenResult<String> {
        let adlast = self.pkg("adlast")?;
        let elems = fields
            .iter()
            .map(|f| {
                let te = self.texpr_literal(&f.type_expr)?;
                let default = self.maybe_any(&f.default)?;
                let annotations = self.annotations_literal(&f.annotations)?;
                Ok(call(
                    &format!("{adlast}Make_Field"),
                    &[
                        string_literal(&f.name),
                        string_literal(&f.serialized_name),
                        te,
                        default,
                        annotations,
                    ],
                ))
            })
            .collect::<GenResult<Vec<_>>>()?;
        if elems.is_empty() {
            Ok(format!("[]{adlast}Field{{}}"))
        } else {
            Ok(format!("[]{adlast}Field{{\n{},\n}}", elems.join(",\n")))
        }
    }

    fn maybe_any(&mut self, value: &Maybe<serde_json::Value>) -> GenResult<String> {
        let types = self.pkg("types")?;
        Ok(match value {
            Maybe::Nothing => format!("{types}Make_Maybe_nothing[any]()"),
            Maybe::Just(v) => format!("{types}Make_Maybe_just[any]({})", any_literal(v)),
        })
    }

    fn gen_registration(
        &mut self,
        decl: &Decl,
        gct: Option<&GoCustomType>,
        out: &mut String,
    ) -> GenResult<()> {
        let goadl = self.pkg("goadl")?;
        let sn = self.scoped_name_literal(&decl.name)?;
        out.push_str("func init() {\n");
        out.push_str(&format!(
            "\t{goadl}RESOLVER.Register(\n\t\t{sn},\n\t\tAST_{}(),\n\t)\n",
            decl.name
        ));
        if let Some(helpers) = gct.and_then(|g| g.helpers.as_ref()) {
            let pkg = self
                .imports
                .add_spec(ImportSpec::named(helpers.import_path.clone(), helpers.pkg.clone()));
            out.push_str(&format!(
                "\t{goadl}RESOLVER.RegisterHelper(\n\t\t{sn},\n\t\t(*{pkg}.{})(nil),\n\t)\n",
                helpers.name
            ));
        }
        out.push_str("}\n\n");
        Ok(())
    }
}

#[cfg(test)]
#[path = "descriptor/descriptor_tests.rs"]
mod descriptor_tests;
