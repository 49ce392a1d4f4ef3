//! Capability-graph expansion into Go service interfaces
//!
//! A root api struct lists http endpoints (`HttpPost<Req, Resp>`,
//! `HttpGet<Resp>`) and nested capabilities (`CapabilityApi<C, S, V>`, where
//! `V` names another api struct). Every distinct struct reachable through
//! capability fields becomes one `<Name>_Service` interface and one
//! `Register_<Name>` function. Nested services are generic over the
//! capability token `C` and the resolved state `S`.
//!
//! Structs are keyed by bare name: Go cannot tell two `Admin` services apart
//! once both are mounted in the same file, so reaching one bare name from two
//! modules is an error rather than a silent merge.

use crate::gofile::{GoFile, service_imports};
use crate::naming::{module_dir, module_package, public};
use crate::writer::GeneratedFile;
use adlgen_core::{
    DeclType, Field, GenConfig, GenError, GenResult, Resolver, ScopedName, TypeExpr, TypeRef,
};
use tracing::{debug, info};

/// Names taken by the generated `C`, `S` and `V` type parameters.
pub const RESERVED_NAMES: [&str; 6] = ["C", "c", "S", "s", "V", "v"];

const CAPABILITY_API: &str = "CapabilityApi";
const HTTP_POST: &str = "HttpPost";
const HTTP_GET: &str = "HttpGet";

/// One api struct reached during traversal.
#[derive(Debug, Clone)]
pub struct ApiInstance<'a> {
    pub name: ScopedName,
    pub fields: &'a [Field],
    /// The capability field this instance was reached through; `None` for the root
    pub via: Option<&'a Field>,
}

impl ApiInstance<'_> {
    pub fn is_capability(&self) -> bool {
        self.via.is_some()
    }
}

/// A capability field below some instance, named by its flattened path.
#[derive(Debug, Clone)]
struct Kid {
    path: String,
    token: TypeExpr,
    state: TypeExpr,
}

/// The bare marker name of a field's type, if it is a reference.
fn marker_name(field: &Field) -> Option<&str> {
    field.type_expr.as_reference().map(|sn| sn.name.as_str())
}

fn check_reserved(name: &str, what: impl FnOnce() -> String) -> GenResult<()> {
    if RESERVED_NAMES.contains(&name) {
        return Err(GenError::ReservedName(what()));
    }
    Ok(())
}

fn check_arity(field: &Field, marker: &str, expected: usize) -> GenResult<()> {
    let actual = field.type_expr.parameters.len();
    if actual != expected {
        return Err(GenError::ArityMismatch {
            decl: format!("{marker} ({})", field.name),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Traversal state over the capability graph of one root.
pub struct CapabilityGraph<'a> {
    resolver: &'a Resolver,
    root: ScopedName,
}

impl<'a> CapabilityGraph<'a> {
    pub fn new(resolver: &'a Resolver, root: ScopedName) -> Self {
        Self { resolver, root }
    }

    /// Every distinct api struct reachable from the root, root first, in
    /// depth-first order.
    pub fn instances(&self) -> GenResult<Vec<ApiInstance<'a>>> {
        let module = self.resolver.module(&self.root.module_name)?;
        let decl = module
            .decls
            .get(&self.root.name)
            .ok_or_else(|| GenError::UnresolvedReference(self.root.clone()))?;
        let root_struct = match &decl.decl_type {
            DeclType::Struct(s) if s.type_params.is_empty() => s,
            _ => {
                return Err(GenError::NotMonomorphic {
                    decl: self.root.clone(),
                });
            }
        };
        let root = ApiInstance {
            name: self.root.clone(),
            fields: &root_struct.fields,
            via: None,
        };
        let mut visited = Vec::new();
        let mut stack = Vec::new();
        self.visit(root, &mut stack, &mut visited)?;
        Ok(visited)
    }

    fn visit(
        &self,
        inst: ApiInstance<'a>,
        stack: &mut Vec<ScopedName>,
        visited: &mut Vec<ApiInstance<'a>>,
    ) -> GenResult<()> {
        check_reserved(&inst.name.name, || inst.name.to_string())?;
        if let Some(prev) = visited.iter().find(|v| v.name.name == inst.name.name) {
            if prev.name.module_name != inst.name.module_name {
                return Err(GenError::AliasConflict {
                    name: inst.name.name.clone(),
                    first: prev.name.to_string(),
                    second: inst.name.to_string(),
                });
            }
            if prev.name == self.root {
                return Err(GenError::SelfNesting(self.root.clone()));
            }
            if stack.contains(&inst.name) {
                let mut path: Vec<String> = stack.iter().map(ToString::to_string).collect();
                path.push(inst.name.to_string());
                return Err(GenError::CapabilityCycle { path });
            }
            debug!(api = %inst.name, "already visited");
            return Ok(());
        }

        let fields = inst.fields;
        let owner = inst.name.clone();
        stack.push(inst.name.clone());
        visited.push(inst);
        for field in fields {
            if marker_name(field) != Some(CAPABILITY_API) {
                continue;
            }
            check_reserved(&field.name, || format!("{owner}::{}", field.name))?;
            let child = self.capability_target(&owner, field)?;
            self.visit(child, stack, visited)?;
        }
        stack.pop();
        Ok(())
    }

    /// Resolve the api struct named by a `CapabilityApi<C, S, V>` field.
    fn capability_target(&self, owner: &ScopedName, field: &'a Field) -> GenResult<ApiInstance<'a>> {
        let (name, fields) = self.target_struct(owner, field)?;
        Ok(ApiInstance {
            name,
            fields,
            via: Some(field),
        })
    }

    fn target_struct(&self, owner: &ScopedName, field: &Field) -> GenResult<(ScopedName, &'a [Field])> {
        check_arity(field, CAPABILITY_API, 3)?;
        let target = field.type_expr.parameters[2]
            .as_reference()
            .ok_or_else(|| GenError::UnexpectedDeclKind {
                decl: owner.clone(),
                field: field.name.clone(),
                expected: "struct",
                found: "non-reference type",
            })?;
        let decl = self.resolver.resolve(target)?;
        match &decl.decl_type {
            DeclType::Struct(s) if s.type_params.is_empty() => Ok((target.clone(), &s.fields)),
            DeclType::Struct(_) => Err(GenError::NotMonomorphic {
                decl: target.clone(),
            }),
            other => Err(GenError::UnexpectedDeclKind {
                decl: owner.clone(),
                field: field.name.clone(),
                expected: "struct",
                found: other.kind(),
            }),
        }
    }

    /// The capability field `field` plus everything below it, flattened to
    /// `a`, `a_b`, ...
    fn field_kids(&self, owner: &ScopedName, prefix: &str, field: &Field) -> GenResult<Vec<Kid>> {
        let path = format!("{prefix}{}", field.name);
        let (child, fields) = self.target_struct(owner, field)?;
        let params = &field.type_expr.parameters;
        let mut out = vec![Kid {
            path: path.clone(),
            token: params[0].clone(),
            state: params[1].clone(),
        }];
        out.extend(self.kids(&child, &format!("{path}_"), fields)?);
        Ok(out)
    }

    fn kids(&self, owner: &ScopedName, prefix: &str, fields: &[Field]) -> GenResult<Vec<Kid>> {
        let mut out = Vec::new();
        for field in fields {
            if marker_name(field) == Some(CAPABILITY_API) {
                out.extend(self.field_kids(owner, prefix, field)?);
            }
        }
        Ok(out)
    }

    /// The `CapabilityApi` field holding the nested api value: the one typed
    /// by the marker's third type parameter.
    fn payload_field(&self, owner: &ScopedName, field: &Field) -> GenResult<String> {
        let marker = field
            .type_expr
            .as_reference()
            .ok_or_else(|| GenError::UnexpectedDeclKind {
                decl: owner.clone(),
                field: field.name.clone(),
                expected: "struct",
                found: "non-reference type",
            })?;
        let decl = self.resolver.resolve(marker)?;
        let payload = match &decl.decl_type {
            DeclType::Struct(s) => s.type_params.get(2).and_then(|v| {
                s.fields
                    .iter()
                    .find(|f| matches!(&f.type_expr.type_ref, TypeRef::TypeParam(p) if p == v))
            }),
            _ => None,
        };
        payload
            .map(|f| f.name.clone())
            .ok_or_else(|| GenError::UnexpectedDeclKind {
                decl: marker.clone(),
                field: field.name.clone(),
                expected: "struct with a field of its third type parameter",
                found: decl.decl_type.kind(),
            })
    }
}

impl GoFile<'_> {
    fn gen_service_interface(&mut self, inst: &ApiInstance<'_>, out: &mut String) -> GenResult<()> {
        let cap = inst.is_capability();
        let generics = if cap { "[C any, S any]" } else { "" };
        let cs = if cap { "c C, s S, " } else { "" };
        let context = self.pkg("context")?;
        out.push_str(&format!(
            "type {}_Service{generics} interface {{\n",
            inst.name.name
        ));
        for field in inst.fields {
            let params = &field.type_expr.parameters;
            match marker_name(field) {
                Some(HTTP_POST) => {
                    check_arity(field, HTTP_POST, 2)?;
                    let req = self.go_type(&params[0])?;
                    let resp = self.go_type(&params[1])?;
                    out.push_str(&format!(
                        "\t{}(ctx {context}Context, {cs}req {req}) ({resp}, error)\n",
                        public(&field.name)
                    ));
                }
                Some(HTTP_GET) => {
                    check_arity(field, HTTP_GET, 1)?;
                    let resp = self.go_type(&params[0])?;
                    let cs = cs.trim_end_matches(", ");
                    let sep = if cs.is_empty() { "" } else { ", " };
                    out.push_str(&format!(
                        "\t{}(ctx {context}Context{sep}{cs}) ({resp}, error)\n",
                        public(&field.name)
                    ));
                }
                Some(CAPABILITY_API) => {
                    check_arity(field, CAPABILITY_API, 3)?;
                    let c = self.go_type(&params[0])?;
                    let s = self.go_type(&params[1])?;
                    let target = capability_struct_name(&params[2]);
                    out.push_str(&format!(
                        "\t{}() {target}_Service[{c}, {s}]\n",
                        public(&field.name)
                    ));
                }
                _ => {}
            }
        }
        out.push_str("}\n\n");
        Ok(())
    }

    fn state_fn_type(&mut self, c: &TypeExpr, s: &TypeExpr) -> GenResult<String> {
        let context = self.pkg("context")?;
        let c = self.go_type(c)?;
        let s = self.go_type(s)?;
        Ok(format!("func(ctx {context}Context, c {c}) ({s}, error)"))
    }

    fn gen_register(
        &mut self,
        graph: &CapabilityGraph<'_>,
        inst: &ApiInstance<'_>,
        out: &mut String,
    ) -> GenResult<()> {
        let cap = inst.is_capability();
        let name = &inst.name.name;
        let http = self.pkg("http")?;
        let context = self.pkg("context")?;
        let capability = self.pkg("capability")?;
        let api_type = self.go_type(&TypeExpr::reference(inst.name.clone(), vec![]))?;

        let mut params = vec![
            format!("mux *{http}ServeMux"),
            format!("api {api_type}"),
        ];
        if cap {
            params.push(format!("srv {name}_Service[C, S]"));
            params.push(format!("state func(ctx {context}Context, c C) (S, error)"));
        } else {
            params.push(format!("srv {name}_Service"));
        }
        for kid in graph.kids(&inst.name, "", inst.fields)? {
            let sig = self.state_fn_type(&kid.token, &kid.state)?;
            params.push(format!("{}_state {sig}", kid.path));
        }

        let generics = if cap { "[C any, S any]" } else { "" };
        let lines: Vec<String> = params.iter().map(|p| format!("\t{p},\n")).collect();
        out.push_str(&format!(
            "func Register_{name}{generics}(\n{}) {{\n",
            lines.concat()
        ));

        for field in inst.fields {
            let f = public(&field.name);
            match marker_name(field) {
                Some(HTTP_POST) if cap => out.push_str(&format!(
                    "\t{capability}HandleCapPost(mux, api.{f}, state, srv.{f})\n"
                )),
                Some(HTTP_POST) => {
                    out.push_str(&format!("\t{capability}HandlePost(mux, api.{f}, srv.{f})\n"))
                }
                Some(HTTP_GET) if cap => out.push_str(&format!(
                    "\t{capability}HandleCapGet(mux, api.{f}, state, srv.{f})\n"
                )),
                Some(HTTP_GET) => {
                    out.push_str(&format!("\t{capability}HandleGet(mux, api.{f}, srv.{f})\n"))
                }
                Some(CAPABILITY_API) => {
                    let target = capability_struct_name(&field.type_expr.parameters[2]);
                    let payload = graph.payload_field(&inst.name, field)?;
                    let mut args = vec![
                        "mux".to_string(),
                        format!("api.{f}.{}", public(&payload)),
                        format!("srv.{f}()"),
                    ];
                    args.extend(
                        graph
                            .field_kids(&inst.name, "", field)?
                            .into_iter()
                            .map(|k| format!("{}_state", k.path)),
                    );
                    out.push_str(&format!("\tRegister_{target}({})\n", args.join(", ")));
                }
                _ => {}
            }
        }
        out.push_str("}\n\n");
        Ok(())
    }
}

fn capability_struct_name(te: &TypeExpr) -> String {
    te.as_reference()
        .map(|sn| sn.name.clone())
        .unwrap_or_default()
}

/// Expand the capability graph of `root` into its service file.
///
/// The whole graph is validated before anything is rendered, so a failure
/// leaves no partial output.
pub fn generate_api(
    resolver: &Resolver,
    config: &GenConfig,
    root: &ScopedName,
) -> GenResult<GeneratedFile> {
    let graph = CapabilityGraph::new(resolver, root.clone());
    let instances = graph.instances()?;
    info!(root = %root, services = instances.len(), "expanding capability graph");

    let mut file = GoFile::with_reserved(resolver, config, root.module_name.clone(), service_imports(config));
    let mut body = String::new();
    for inst in &instances {
        file.gen_service_interface(inst, &mut body)?;
        file.gen_register(&graph, inst, &mut body)?;
    }
    let package = module_package(&root.module_name);
    let path = config
        .output_dir
        .join(module_dir(&root.module_name))
        .join(format!("{package}_srv.{}", config.extension));
    Ok(file.into_file(path, &body))
}

/// Expand several roots, one service file each.
///
/// A service file is named after its module, and services reachable from two
/// roots would be declared twice in one Go package, so each module may hold
/// at most one root. Every root is expanded before any file is returned.
pub fn generate_apis(
    resolver: &Resolver,
    config: &GenConfig,
    roots: &[ScopedName],
) -> GenResult<Vec<GeneratedFile>> {
    let mut seen: Vec<&ScopedName> = Vec::with_capacity(roots.len());
    for root in roots {
        if let Some(first) = seen.iter().find(|r| r.module_name == root.module_name) {
            return Err(GenError::Config(format!(
                "api roots {first} and {root} share module '{}'; one root per module",
                root.module_name
            )));
        }
        seen.push(root);
    }
    roots
        .iter()
        .map(|root| generate_api(resolver, config, root))
        .collect()
}
