use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeVar {
    pub id: usize,
}

impl TypeVar {
    pub fn new(id: usize) -> Self {
        Self { id }
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'t{}", self.id)
    }
}

/// Built-in ground types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Bool,
    String,
    Unit,
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Int => "int",
            Primitive::Bool => "bool",
            Primitive::String => "string",
            Primitive::Unit => "unit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Var(TypeVar),
    Primitive(Primitive),
    Arrow(Box<Type>, Box<Type>),
    Tuple(Vec<Type>),
    List(Box<Type>),
}

impl Type {
    pub fn int() -> Self {
        Type::Primitive(Primitive::Int)
    }

    pub fn bool() -> Self {
        Type::Primitive(Primitive::Bool)
    }

    pub fn string() -> Self {
        Type::Primitive(Primitive::String)
    }

    pub fn unit() -> Self {
        Type::Primitive(Primitive::Unit)
    }

    pub fn var(id: usize) -> Self {
        Type::Var(TypeVar::new(id))
    }

    pub fn arrow(domain: Type, range: Type) -> Self {
        Type::Arrow(Box::new(domain), Box::new(range))
    }

    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    pub fn tuple(items: Vec<Type>) -> Self {
        Type::Tuple(items)
    }

    pub fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        let mut set = BTreeSet::new();
        self.collect_vars(&mut |v| {
            set.insert(v);
        });
        set
    }

    /// Variables in order of first appearance, left to right.
    pub fn vars_in_order(&self) -> Vec<TypeVar> {
        let mut seen = Vec::new();
        self.collect_vars(&mut |v| {
            if !seen.contains(&v) {
                seen.push(v);
            }
        });
        seen
    }

    fn collect_vars(&self, f: &mut impl FnMut(TypeVar)) {
        match self {
            Type::Primitive(_) => {}
            Type::Var(v) => f(*v),
            Type::Arrow(t1, t2) => {
                t1.collect_vars(f);
                t2.collect_vars(f);
            }
            Type::Tuple(items) => {
                for item in items {
                    item.collect_vars(f);
                }
            }
            Type::List(elem) => elem.collect_vars(f),
        }
    }

    /// Does `var` appear anywhere inside this type?
    pub fn occurs(&self, var: TypeVar) -> bool {
        match self {
            Type::Primitive(_) => false,
            Type::Var(v) => *v == var,
            Type::Arrow(t1, t2) => t1.occurs(var) || t2.occurs(var),
            Type::Tuple(items) => items.iter().any(|t| t.occurs(var)),
            Type::List(elem) => elem.occurs(var),
        }
    }

    /// Replace variables simultaneously; unmapped variables are kept.
    pub fn rename_vars(&self, mapping: &BTreeMap<TypeVar, TypeVar>) -> Type {
        match self {
            Type::Primitive(_) => self.clone(),
            Type::Var(v) => Type::Var(mapping.get(v).copied().unwrap_or(*v)),
            Type::Arrow(t1, t2) => Type::arrow(t1.rename_vars(mapping), t2.rename_vars(mapping)),
            Type::Tuple(items) => Type::Tuple(items.iter().map(|t| t.rename_vars(mapping)).collect()),
            Type::List(elem) => Type::list(elem.rename_vars(mapping)),
        }
    }

    pub fn pretty(&self) -> String {
        self.pretty_with(&BTreeMap::new())
    }

    /// Render with some variables given readable names; the rest print as `'tN`.
    pub fn pretty_with(&self, names: &BTreeMap<TypeVar, String>) -> String {
        let mut out = String::new();
        self.write_prec(&mut out, names, Prec::Arrow);
        out
    }

    fn write_prec(&self, out: &mut String, names: &BTreeMap<TypeVar, String>, prec: Prec) {
        match self {
            Type::Primitive(p) => out.push_str(p.name()),
            Type::Var(v) => match names.get(v) {
                Some(name) => {
                    out.push('\'');
                    out.push_str(name);
                }
                None => out.push_str(&v.to_string()),
            },
            Type::List(elem) => {
                elem.write_prec(out, names, Prec::Atom);
                out.push_str(" list");
            }
            Type::Tuple(items) if items.is_empty() => out.push_str("()"),
            Type::Tuple(items) => {
                let wrap = prec > Prec::Tuple;
                if wrap {
                    out.push('(');
                }
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" * ");
                    }
                    item.write_prec(out, names, Prec::Atom);
                }
                if wrap {
                    out.push(')');
                }
            }
            Type::Arrow(domain, range) => {
                let wrap = prec > Prec::Arrow;
                if wrap {
                    out.push('(');
                }
                domain.write_prec(out, names, Prec::Tuple);
                out.push_str(" -> ");
                range.write_prec(out, names, Prec::Arrow);
                if wrap {
                    out.push(')');
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Arrow,
    Tuple,
    Atom,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// `∀ vars. ty`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScheme {
    pub vars: Vec<TypeVar>,
    pub ty: Type,
}

impl TypeScheme {
    pub fn monomorphic(ty: Type) -> Self {
        TypeScheme {
            vars: Vec::new(),
            ty,
        }
    }

    pub fn polymorphic(vars: Vec<TypeVar>, ty: Type) -> Self {
        TypeScheme { vars, ty }
    }

    pub fn is_monomorphic(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        let mut free = self.ty.free_type_vars();
        for var in &self.vars {
            free.remove(var);
        }
        free
    }

    /// Quantified variables renamed `'a`, `'b`, ... by first appearance.
    pub fn pretty(&self) -> String {
        let names: BTreeMap<TypeVar, String> = self
            .ty
            .vars_in_order()
            .into_iter()
            .filter(|v| self.vars.contains(v))
            .enumerate()
            .map(|(i, v)| (v, letter_name(i)))
            .collect();
        self.ty.pretty_with(&names)
    }
}

fn letter_name(index: usize) -> String {
    let letter = (b'a' + (index % 26) as u8) as char;
    match index / 26 {
        0 => letter.to_string(),
        n => format!("{}{}", letter, n),
    }
}

impl fmt::Display for TypeScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_type_vars_concrete() {
        let ty = Type::arrow(Type::int(), Type::list(Type::string()));
        assert!(ty.free_type_vars().is_empty());
    }

    #[test]
    fn test_free_type_vars_nested() {
        let ty = Type::tuple(vec![
            Type::var(0),
            Type::list(Type::arrow(Type::var(1), Type::var(0))),
        ]);
        let free = ty.free_type_vars();
        assert_eq!(free.len(), 2);
        assert!(free.contains(&TypeVar::new(0)));
        assert!(free.contains(&TypeVar::new(1)));
    }

    #[test]
    fn test_vars_in_order() {
        let ty = Type::arrow(Type::var(5), Type::arrow(Type::var(2), Type::var(5)));
        assert_eq!(ty.vars_in_order(), vec![TypeVar::new(5), TypeVar::new(2)]);
    }

    #[test]
    fn test_occurs() {
        let var = TypeVar::new(0);
        assert!(Type::Var(var).occurs(var));
        assert!(!Type::var(1).occurs(var));
        assert!(!Type::int().occurs(var));
        assert!(Type::list(Type::tuple(vec![Type::int(), Type::Var(var)])).occurs(var));
    }

    #[test]
    fn test_rename_vars_is_simultaneous() {
        let mapping: BTreeMap<_, _> = [
            (TypeVar::new(0), TypeVar::new(1)),
            (TypeVar::new(1), TypeVar::new(0)),
        ]
        .into_iter()
        .collect();
        let ty = Type::arrow(Type::var(0), Type::list(Type::var(1)));
        assert_eq!(
            ty.rename_vars(&mapping),
            Type::arrow(Type::var(1), Type::list(Type::var(0)))
        );
    }

    #[test]
    fn test_scheme_free_vars_excludes_bound() {
        let scheme = TypeScheme::polymorphic(
            vec![TypeVar::new(0)],
            Type::arrow(Type::var(0), Type::var(1)),
        );
        let free = scheme.free_type_vars();
        assert_eq!(free.len(), 1);
        assert!(free.contains(&TypeVar::new(1)));
    }

    #[test]
    fn test_pretty_print_primitives() {
        assert_eq!(Type::int().pretty(), "int");
        assert_eq!(Type::bool().pretty(), "bool");
        assert_eq!(Type::string().pretty(), "string");
        assert_eq!(Type::unit().pretty(), "unit");
        assert_eq!(Type::var(3).pretty(), "'t3");
    }

    #[test]
    fn test_pretty_print_arrows() {
        let ty = Type::arrow(Type::int(), Type::arrow(Type::int(), Type::int()));
        assert_eq!(ty.pretty(), "int -> int -> int");

        let ty = Type::arrow(Type::arrow(Type::int(), Type::int()), Type::string());
        assert_eq!(ty.pretty(), "(int -> int) -> string");
    }

    #[test]
    fn test_pretty_print_lists_and_tuples() {
        assert_eq!(Type::list(Type::int()).pretty(), "int list");
        assert_eq!(Type::list(Type::list(Type::bool())).pretty(), "bool list list");

        let pair = Type::tuple(vec![Type::int(), Type::bool()]);
        assert_eq!(pair.pretty(), "int * bool");
        assert_eq!(Type::list(pair.clone()).pretty(), "(int * bool) list");
        assert_eq!(
            Type::arrow(pair.clone(), Type::int()).pretty(),
            "int * bool -> int"
        );
        assert_eq!(
            Type::tuple(vec![pair, Type::unit()]).pretty(),
            "(int * bool) * unit"
        );
        assert_eq!(
            Type::list(Type::arrow(Type::int(), Type::int())).pretty(),
            "(int -> int) list"
        );
    }

    #[test]
    fn test_scheme_pretty_renames_bound_vars() {
        let scheme = TypeScheme::polymorphic(
            vec![TypeVar::new(7), TypeVar::new(3)],
            Type::arrow(
                Type::arrow(Type::var(3), Type::var(7)),
                Type::arrow(Type::list(Type::var(3)), Type::list(Type::var(7))),
            ),
        );
        assert_eq!(scheme.pretty(), "('a -> 'b) -> 'a list -> 'b list");
    }

    #[test]
    fn test_scheme_pretty_keeps_free_vars() {
        let scheme = TypeScheme::polymorphic(
            vec![TypeVar::new(1)],
            Type::arrow(Type::var(0), Type::var(1)),
        );
        assert_eq!(scheme.pretty(), "'t0 -> 'a");
    }

    #[test]
    fn test_letter_names_wrap() {
        assert_eq!(letter_name(0), "a");
        assert_eq!(letter_name(25), "z");
        assert_eq!(letter_name(26), "a1");
    }
}
