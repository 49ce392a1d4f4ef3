//! Go type parameter lists
//!
//! A [`TypeParamList`] is the ordered parameter header of a generated Go type
//! or function. The same list renders as a declaration header
//! (`[A any, B comparable]`), an instantiation (`[A, B]`) or the arguments of a
//! descriptor function.

use crate::naming::param_name;
use adlgen_core::annotations::type_constraints;
use adlgen_core::{Decl, GenResult};

/// Identifiers in scope inside a generated `Texpr_` body.
const TEXPR_LOCALS: [&str; 2] = ["te", "adlast"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub constraint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeParamList {
    params: Vec<Param>,
}

impl TypeParamList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters with positional constraints; missing constraints mean `any`.
    pub fn from_names(names: &[String], constraints: &[String]) -> Self {
        Self {
            params: names
                .iter()
                .enumerate()
                .map(|(i, n)| Param {
                    name: n.clone(),
                    constraint: constraints.get(i).cloned(),
                })
                .collect(),
        }
    }

    /// A declaration's own parameters, constrained by its
    /// `TypeParamConstraintList` annotation.
    pub fn from_decl(decl: &Decl) -> GenResult<Self> {
        let constraints = type_constraints(&decl.annotations, &decl.name)?;
        Ok(Self::from_names(decl.type_params(), &constraints))
    }

    /// Append `name` unless already present.
    pub fn push_unique(&mut self, name: &str) {
        if !self.contains(name) {
            self.params.push(Param {
                name: name.to_string(),
                constraint: None,
            });
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name == name)
    }

    /// The parameters of `self`, in order, that also occur in `used`.
    pub fn restrict_to(&self, used: &TypeParamList) -> Self {
        Self {
            params: self
                .params
                .iter()
                .filter(|p| used.contains(&p.name))
                .cloned()
                .collect(),
        }
    }

    /// Append a fresh unconstrained parameter, renaming on collision
    /// (`T`, `T2`, `T3`, ...). Returns the extended list and the chosen name.
    pub fn add_param(&self, name: &str) -> (Self, String) {
        let mut chosen = name.to_string();
        let mut n = 2u64;
        while self.contains(&chosen) {
            chosen = format!("{name}{n}");
            n += 1;
        }
        let mut params = self.params.clone();
        params.push(Param {
            name: chosen.clone(),
            constraint: None,
        });
        (Self { params }, chosen)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// Declaration header: `[A any, B comparable]`.
    pub fn lside(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.name, p.constraint.as_deref().unwrap_or("any")))
            .collect();
        format!("[{}]", parts.join(", "))
    }

    /// Instantiation: `[A, B]`.
    pub fn rside(&self) -> String {
        rside(self.names())
    }

    /// Descriptor argument names: lower-cased, keyword-escaped and distinct
    /// from each other and from the locals of the descriptor body.
    fn texpr_arg_names(&self) -> Vec<String> {
        let mut taken: Vec<String> = TEXPR_LOCALS.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::with_capacity(self.params.len());
        for p in &self.params {
            let base = param_name(&p.name);
            let mut chosen = base.clone();
            let mut n = 2u64;
            while taken.contains(&chosen) {
                chosen = format!("{base}{n}");
                n += 1;
            }
            taken.push(chosen.clone());
            out.push(chosen);
        }
        out
    }

    /// Descriptor function arguments: `a adlast.ATypeExpr[A], b adlast.ATypeExpr[B]`.
    pub fn texpr_args(&self) -> String {
        self.texpr_arg_names()
            .iter()
            .zip(self.names())
            .map(|(arg, n)| format!("{arg} adlast.ATypeExpr[{n}]"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Values of the descriptor arguments: `a.Value, b.Value`.
    pub fn texpr_values(&self) -> String {
        self.texpr_arg_names()
            .iter()
            .map(|arg| format!("{arg}.Value"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Render a bracketed instantiation list, empty when there are no arguments.
pub fn rside<'a>(args: impl IntoIterator<Item = &'a str>) -> String {
    let args: Vec<&str> = args.into_iter().collect();
    if args.is_empty() {
        String::new()
    } else {
        format!("[{}]", args.join(", "))
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use adlgen_core::annotations::constraint_list_name;
    use adlgen_core::{Field, TypeExpr};
    use serde_json::json;

    fn ab() -> TypeParamList {
        TypeParamList::from_names(&["A".into(), "B".into()], &[])
    }

    #[test]
    fn TypeParamList___empty___renders_nothing() {
        let tp = TypeParamList::new();

        assert_eq!(tp.lside(), "");
        assert_eq!(tp.rside(), "");
        assert_eq!(tp.texpr_args(), "");
    }

    #[test]
    fn TypeParamList___lside___defaults_to_any() {
        assert_eq!(ab().lside(), "[A any, B any]");
        assert_eq!(ab().rside(), "[A, B]");
    }

    #[test]
    fn TypeParamList___constraints___apply_positionally() {
        let tp = TypeParamList::from_names(&["K".into(), "V".into()], &["comparable".into()]);

        assert_eq!(tp.lside(), "[K comparable, V any]");
    }

    #[test]
    fn TypeParamList___from_decl___reads_constraint_annotation() {
        let decl = Decl::new_struct(
            "Map",
            &["K", "V"],
            vec![Field::new("k", TypeExpr::type_param("K"))],
        )
        .with_annotation(constraint_list_name(), json!(["comparable", "any"]));

        let tp = TypeParamList::from_decl(&decl).unwrap();

        assert_eq!(tp.lside(), "[K comparable, V any]");
    }

    #[test]
    fn TypeParamList___texpr_args___lowercases_names() {
        assert_eq!(ab().texpr_args(), "a adlast.ATypeExpr[A], b adlast.ATypeExpr[B]");
        assert_eq!(ab().texpr_values(), "a.Value, b.Value");
    }

    #[test]
    fn TypeParamList___texpr_args___escape_go_keywords() {
        let tp = TypeParamList::from_names(&["Type".into(), "Map".into()], &[]);

        assert_eq!(
            tp.texpr_args(),
            "type_ adlast.ATypeExpr[Type], map_ adlast.ATypeExpr[Map]"
        );
        assert_eq!(tp.texpr_values(), "type_.Value, map_.Value");
    }

    #[test]
    fn TypeParamList___texpr_args___case_only_difference___stays_distinct() {
        let tp = TypeParamList::from_names(&["T".into(), "t".into(), "Te".into()], &[]);

        assert_eq!(
            tp.texpr_args(),
            "t adlast.ATypeExpr[T], t2 adlast.ATypeExpr[t], te2 adlast.ATypeExpr[Te]"
        );
        assert_eq!(tp.texpr_values(), "t.Value, t2.Value, te2.Value");
    }

    #[test]
    fn TypeParamList___add_param___renames_on_collision() {
        let tp = TypeParamList::from_names(&["T".into(), "T2".into()], &[]);

        let (out, name) = tp.add_param("T");

        assert_eq!(name, "T3");
        assert_eq!(out.rside(), "[T, T2, T3]");
    }

    #[test]
    fn TypeParamList___add_param___keeps_free_name() {
        let (out, name) = ab().add_param("T");

        assert_eq!(name, "T");
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn TypeParamList___restrict_to___keeps_declared_order() {
        let decl_params = TypeParamList::from_names(
            &["A".into(), "B".into(), "C".into()],
            &["comparable".into(), "any".into(), "any".into()],
        );
        let mut used = TypeParamList::new();
        used.push_unique("C");
        used.push_unique("A");

        let restricted = decl_params.restrict_to(&used);

        assert_eq!(restricted.lside(), "[A comparable, C any]");
    }

    #[test]
    fn TypeParamList___push_unique___dedups() {
        let mut acc = TypeParamList::new();

        acc.push_unique("T");
        acc.push_unique("T");

        assert_eq!(acc.len(), 1);
    }
}
