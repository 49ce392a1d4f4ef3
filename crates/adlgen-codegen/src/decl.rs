//! Per-declaration Go bodies
//!
//! Structs become an exported wrapper embedding an unexported field struct,
//! plus `MakeAll_`/`Make_` constructors and one `Default_` method per
//! defaulted field. Unions become a wrapper holding one branch value, a
//! branch marker interface, one struct per branch and the `Make_`, `Cast_`
//! and `Handle_` helpers. Type aliases and newtypes map to Go alias and
//! defined types.

use crate::gofile::GoFile;
use crate::gotype::GoType;
use crate::naming::{param_name, public};
use crate::type_params::TypeParamList;
use crate::value::string_literal;
use adlgen_core::annotations::custom_type;
use adlgen_core::{
    Decl, DeclType, Field, GenError, GenResult, NewType, Struct, TypeBindings, TypeDef, TypeExpr,
    Union,
};
use tracing::{debug, warn};

/// One struct field, mapped.
struct GoField<'f> {
    field: &'f Field,
    go_type: GoType,
}

impl GoFile<'_> {
    /// Append the Go body for `decl` to `out`.
    ///
    /// Custom-typed declarations have no body; their Go type already exists.
    pub fn gen_decl(&mut self, decl: &Decl, out: &mut String) -> GenResult<()> {
        if custom_type(decl)?.is_some() {
            debug!(decl = %decl.name, "custom type, no body generated");
            return Ok(());
        }
        debug!(decl = %decl.name, kind = decl.decl_type.kind(), "generating declaration");
        let tps = TypeParamList::from_decl(decl)?;
        match &decl.decl_type {
            DeclType::Struct(s) => self.gen_struct(decl, s, &tps, out),
            DeclType::Union(u) => self.gen_union(decl, u, &tps, out),
            DeclType::TypeDef(td) => self.gen_typedef(decl, td, out),
            DeclType::NewType(nt) => self.gen_newtype(decl, nt, &tps, out),
        }
    }

    fn gen_struct(
        &mut self,
        decl: &Decl,
        s: &Struct,
        tps: &TypeParamList,
        out: &mut String,
    ) -> GenResult<()> {
        let name = &decl.name;
        let (lside, rside) = (tps.lside(), tps.rside());
        let fields = s
            .fields
            .iter()
            .map(|field| {
                Ok(GoField {
                    field,
                    go_type: self.go_type(&field.type_expr)?,
                })
            })
            .collect::<GenResult<Vec<_>>>()?;

        out.push_str(&format!("type {name}{lside} struct {{\n\t_{name}{rside}\n}}\n\n"));
        out.push_str(&format!("type _{name}{lside} struct {{\n"));
        for f in &fields {
            out.push_str(&format!(
                "\t{} {} `json:\"{}\"`\n",
                public(&f.field.name),
                f.go_type,
                f.field.serialized_name
            ));
        }
        out.push_str("}\n\n");

        // MakeAll_: every field as a parameter
        let params: Vec<String> = fields
            .iter()
            .map(|f| format!("{} {}", param_name(&f.field.name), f.go_type))
            .collect();
        let inits: Vec<String> = fields
            .iter()
            .map(|f| format!("{}: {}", public(&f.field.name), param_name(&f.field.name)))
            .collect();
        out.push_str(&format!(
            "{} {name}{rside} {{\n\treturn {}\n}}\n\n",
            signature(&format!("func MakeAll_{name}{lside}"), &params),
            wrapper_literal(name, &rside, &inits)
        ));

        // Make_: required fields only
        let required: Vec<&GoField> = fields
            .iter()
            .filter(|f| !f.field.default.is_just() && !is_void(&f.field.type_expr))
            .collect();
        let params: Vec<String> = required
            .iter()
            .map(|f| format!("{} {}", param_name(&f.field.name), f.go_type))
            .collect();
        let inits: Vec<String> = fields
            .iter()
            .map(|f| {
                let value = if f.field.default.is_just() {
                    format!("((*{name}{rside})(nil)).Default_{}()", f.field.name)
                } else if is_void(&f.field.type_expr) {
                    "struct{}{}".to_string()
                } else {
                    param_name(&f.field.name)
                };
                format!("{}: {value}", public(&f.field.name))
            })
            .collect();
        out.push_str(&format!(
            "{} {name}{rside} {{\n\tret := {}\n\treturn ret\n}}\n\n",
            signature(&format!("func Make_{name}{lside}"), &params),
            wrapper_literal(name, &rside, &inits)
        ));

        for f in &fields {
            if let Some(default) = f.field.default.as_option() {
                let location = format!("{}.{name}::{}", self.module_name, f.field.name);
                let literal = self.go_value(&f.field.type_expr, default, &location)?;
                out.push_str(&format!(
                    "func (*{name}{rside}) Default_{}() {} {{\n\treturn {literal}\n}}\n",
                    f.field.name, f.go_type
                ));
            }
        }
        if fields.iter().any(|f| f.field.default.is_just()) {
            out.push('\n');
        }

        self.gen_type_token_texprs(decl, s, &rside, out)
    }

    /// Surface concrete `TypeToken` fields of referenced structs.
    ///
    /// For `struct Holder { b: Box<Int32> }` with `struct Box<T> { tok: TypeToken<T> }`,
    /// `Holder` gets a `TypeTokenTexprs()` method keyed `b.tok`.
    fn gen_type_token_texprs(
        &mut self,
        decl: &Decl,
        s: &Struct,
        rside: &str,
        out: &mut String,
    ) -> GenResult<()> {
        let resolver = self.resolver;
        let mut entries = Vec::new();
        for field in &s.fields {
            let Some(sn) = field.type_expr.as_reference() else {
                continue;
            };
            let target = resolver.resolve(sn)?;
            if custom_type(target)?.is_some() {
                continue;
            }
            let Some(inner) = target.as_struct() else {
                continue;
            };
            let bindings = TypeBindings::for_decl(sn, target, &field.type_expr.parameters)?;
            for tt in &inner.fields {
                if tt.type_expr.as_primitive() != Some("TypeToken") {
                    continue;
                }
                if tt.type_expr.parameters.len() != 1 {
                    return Err(GenError::ArityMismatch {
                        decl: format!("{sn}::{}", tt.name),
                        expected: 1,
                        actual: tt.type_expr.parameters.len(),
                    });
                }
                let (mono, concrete) = bindings.substitute_concrete(tt)?;
                if !concrete {
                    warn!(
                        decl = %decl.name,
                        field = %field.name,
                        "type parameter passed through to a TypeToken, TypeTokenTexprs not generated"
                    );
                    out.push_str(&format!(
                        "// {}::{} Type Param is passed through to a TypeToken, TypeTokenTexprs not generated\n\n",
                        decl.name, field.name
                    ));
                    return Ok(());
                }
                let key = format!("{}.{}", field.name, tt.name);
                let literal = self.texpr_literal(&mono.parameters[0])?;
                entries.push((key, literal));
            }
        }
        if entries.is_empty() {
            return Ok(());
        }
        let adlast = self.pkg("adlast")?;
        out.push_str(&format!(
            "func (*{}{rside}) TypeTokenTexprs() map[string]{adlast}TypeExpr {{\n\treturn map[string]{adlast}TypeExpr{{\n",
            decl.name
        ));
        for (key, literal) in entries {
            out.push_str(&format!("\t\t{}: {literal},\n", string_literal(&key)));
        }
        out.push_str("\t}\n}\n\n");
        Ok(())
    }

    fn gen_union(
        &mut self,
        decl: &Decl,
        u: &Union,
        tps: &TypeParamList,
        out: &mut String,
    ) -> GenResult<()> {
        let name = &decl.name;
        let (lside, rside) = (tps.lside(), tps.rside());
        let marker = format!("{name}Branch");

        let mut branches = Vec::with_capacity(u.fields.len());
        for field in &u.fields {
            let mut acc = TypeParamList::new();
            let go_type = self.go_type_acc(&field.type_expr, &mut acc)?;
            let branch_tps = tps.restrict_to(&acc);
            branches.push(Branch {
                field,
                go_type,
                type_name: format!("{name}_{}", public(&field.name)),
                tps: branch_tps,
            });
        }

        out.push_str(&format!(
            "type {name}{lside} struct {{\n\tBranch {marker}\n}}\n\n"
        ));
        out.push_str(&format!(
            "type {marker} interface {{\n\tis{marker}()\n}}\n\n"
        ));

        out.push_str(&format!(
            "func (*{name}{rside}) MakeNewBranch(key string) (any, error) {{\n\tswitch key {{\n"
        ));
        for b in &branches {
            out.push_str(&format!(
                "\tcase {}:\n\t\treturn &{}{}{{}}, nil\n",
                string_literal(&b.field.serialized_name),
                b.type_name,
                b.tps.rside()
            ));
        }
        let fmt = self.pkg("fmt")?;
        out.push_str(&format!(
            "\t}}\n\treturn nil, {fmt}Errorf(\"unknown branch is : %s\", key)\n}}\n\n"
        ));

        for b in &branches {
            out.push_str(&format!(
                "type {}{} struct {{\n\tV {} `branch:\"{}\"`\n}}\n",
                b.type_name,
                b.tps.lside(),
                b.go_type,
                b.field.serialized_name
            ));
        }
        out.push('\n');
        for b in &branches {
            out.push_str(&format!(
                "func ({}{}) is{marker}() {{}}\n",
                b.type_name,
                b.tps.rside()
            ));
        }
        out.push('\n');

        for b in &branches {
            out.push_str(&format!(
                "func Make_{name}_{}{lside}(v {}) {name}{rside} {{\n\treturn {name}{rside}{{\n\t\t{}{}{{v}},\n\t}}\n}}\n\n",
                b.field.name,
                b.go_type,
                b.type_name,
                b.tps.rside()
            ));
        }

        for b in &branches {
            out.push_str(&format!(
                "func (un {name}{rside}) Cast_{}() ({}, bool) {{\n\tbr, ok := un.Branch.({}{})\n\treturn br.V, ok\n}}\n\n",
                b.field.name,
                b.go_type,
                b.type_name,
                b.tps.rside()
            ));
        }

        union_handler(name, tps, &branches, out);
        Ok(())
    }

    fn gen_typedef(&mut self, decl: &Decl, td: &TypeDef, out: &mut String) -> GenResult<()> {
        if !td.type_params.is_empty() {
            debug!(decl = %decl.name, "generic type alias, expanded at each use");
            return Ok(());
        }
        let gt = self.go_type(&td.type_expr)?;
        out.push_str(&format!("type {} = {gt}\n\n", decl.name));
        Ok(())
    }

    fn gen_newtype(
        &mut self,
        decl: &Decl,
        nt: &NewType,
        tps: &TypeParamList,
        out: &mut String,
    ) -> GenResult<()> {
        let gt = self.go_type(&nt.type_expr)?;
        out.push_str(&format!("type {}{} {gt}\n\n", decl.name, tps.lside()));
        Ok(())
    }
}

struct Branch<'f> {
    field: &'f Field,
    go_type: GoType,
    type_name: String,
    tps: TypeParamList,
}

/// `Handle_X` dispatches on the active branch; its result type parameter is
/// appended to the union's own parameters under a fresh name.
fn union_handler(name: &str, tps: &TypeParamList, branches: &[Branch<'_>], out: &mut String) {
    let rside = tps.rside();
    let (handler_tps, ret) = tps.add_param("T");
    let mut params = vec![format!("_in {name}{rside}")];
    for b in branches {
        let p = param_name(&b.field.name);
        params.push(format!("{p} func({p} {}) {ret}", b.go_type));
    }
    params.push(format!("_default func() {ret}"));
    // Go rejects an unused type switch binding
    let binding = if branches.is_empty() { "" } else { "_b := " };
    out.push_str(&format!(
        "{} {ret} {{\n\tswitch {binding}_in.Branch.(type) {{\n",
        signature(&format!("func Handle_{name}{}", handler_tps.lside()), &params)
    ));
    for b in branches {
        let p = param_name(&b.field.name);
        out.push_str(&format!(
            "\tcase {}{}:\n\t\tif {p} != nil {{\n\t\t\treturn {p}(_b.V)\n\t\t}}\n",
            b.type_name,
            b.tps.rside()
        ));
    }
    out.push_str(&format!(
        "\t}}\n\tif _default != nil {{\n\t\treturn _default()\n\t}}\n\tpanic(\"unhandled branch in : {name}\")\n}}\n\n"
    ));
}

fn is_void(te: &TypeExpr) -> bool {
    te.as_primitive() == Some("Void")
}

/// `func Name[..](\n\ta T,\n)` or `func Name[..]()`.
fn signature(head: &str, params: &[String]) -> String {
    if params.is_empty() {
        format!("{head}()")
    } else {
        let lines: Vec<String> = params.iter().map(|p| format!("\t{p},\n")).collect();
        format!("{head}(\n{})", lines.concat())
    }
}

/// `X[..]{ _X[..]{ Field: value, }, }`
fn wrapper_literal(name: &str, rside: &str, inits: &[String]) -> String {
    let body: Vec<String> = inits.iter().map(|i| format!("\t\t\t{i},\n")).collect();
    format!(
        "{name}{rside}{{\n\t\t_{name}{rside}{{\n{}\t\t}},\n\t}}",
        body.concat()
    )
}
