//! A registry of types with single-inheritance superclasses and directly
//! implemented interfaces, and the walks over it.
//!
//! Rust has no runtime class metadata, so the hierarchy is described
//! explicitly with [`TypeInfo`] records. The walk mirrors what a reflective
//! runtime would answer: follow the superclass chain and, at every class,
//! list the interfaces it declares directly.
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::transform::partition_into;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("type `{0}` is not registered")]
    UnknownType(String),
    #[error("superclass chain of `{0}` loops back on itself")]
    Cycle(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A class that can be instantiated.
    Concrete,
    /// A class that cannot be instantiated.
    Abstract,
    Interface,
}

/// Description of one type in the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,
    pub kind: TypeKind,
    /// Direct superclass; `None` for roots and interfaces.
    pub superclass: Option<String>,
    /// Interfaces declared directly by this type.
    pub interfaces: Vec<String>,
}

impl TypeInfo {
    pub fn class(name: &str, superclass: Option<&str>, interfaces: &[&str]) -> Self {
        Self::new(name, TypeKind::Concrete, superclass, interfaces)
    }

    pub fn abstract_class(name: &str, superclass: Option<&str>, interfaces: &[&str]) -> Self {
        Self::new(name, TypeKind::Abstract, superclass, interfaces)
    }

    pub fn interface(name: &str, extends: &[&str]) -> Self {
        Self::new(name, TypeKind::Interface, None, extends)
    }

    fn new(name: &str, kind: TypeKind, superclass: Option<&str>, interfaces: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            superclass: superclass.map(str::to_owned),
            interfaces: interfaces.iter().map(|&s| s.to_owned()).collect(),
        }
    }
}

/// Interfaces and concrete classes found above a type; abstract classes
/// are left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Partition {
    pub interfaces: BTreeSet<String>,
    pub concrete: BTreeSet<String>,
}

/// Type metadata keyed by name.
///
/// # Examples
///
/// ```
/// use foldkit::hierarchy::TypeRegistry;
///
/// let registry = TypeRegistry::with_java_collections();
/// let p = registry.partition_interfaces("HashSet").unwrap();
/// assert!(p.concrete.contains("Object"));
/// assert!(p.interfaces.contains("Set"));
/// assert!(!p.concrete.contains("AbstractSet"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeInfo>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The part of the `java.util` hierarchy above `ArrayList`, `HashSet`
    /// and `LinkedHashSet` (before sequenced collections were introduced).
    #[must_use]
    pub fn with_java_collections() -> Self {
        let mut r = Self::new();
        for info in [
            TypeInfo::class("Object", None, &[]),
            TypeInfo::interface("Iterable", &[]),
            TypeInfo::interface("Collection", &["Iterable"]),
            TypeInfo::interface("List", &["Collection"]),
            TypeInfo::interface("Set", &["Collection"]),
            TypeInfo::interface("RandomAccess", &[]),
            TypeInfo::interface("Cloneable", &[]),
            TypeInfo::interface("Serializable", &[]),
            TypeInfo::abstract_class("AbstractCollection", Some("Object"), &["Collection"]),
            TypeInfo::abstract_class("AbstractList", Some("AbstractCollection"), &["List"]),
            TypeInfo::abstract_class("AbstractSet", Some("AbstractCollection"), &["Set"]),
            TypeInfo::class(
                "ArrayList",
                Some("AbstractList"),
                &["List", "RandomAccess", "Cloneable", "Serializable"],
            ),
            TypeInfo::class(
                "HashSet",
                Some("AbstractSet"),
                &["Set", "Cloneable", "Serializable"],
            ),
            TypeInfo::class(
                "LinkedHashSet",
                Some("HashSet"),
                &["Set", "Cloneable", "Serializable"],
            ),
        ] {
            r.register(info);
        }
        r
    }

    /// Adds `info`, replacing any type with the same name.
    pub fn register(&mut self, info: TypeInfo) -> Option<TypeInfo> {
        self.types.insert(info.name.clone(), info)
    }

    pub fn get(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<&TypeInfo, HierarchyError> {
        self.get(name)
            .ok_or_else(|| HierarchyError::UnknownType(name.to_owned()))
    }

    /// The superclass chain starting at `name` itself.
    ///
    /// The walk stops at the first type without a superclass, or whose
    /// superclass is not registered.
    pub fn superclasses(&self, name: &str) -> Result<Vec<&TypeInfo>, HierarchyError> {
        let mut current = self.lookup(name)?;
        let mut chain = vec![current];
        let mut seen: HashSet<&str> = HashSet::from([current.name.as_str()]);

        while let Some(parent) = current.superclass.as_deref() {
            let Some(info) = self.get(parent) else {
                trace!(ty = name, parent, "superclass not registered, stopping");
                break;
            };
            if !seen.insert(&info.name) {
                return Err(HierarchyError::Cycle(name.to_owned()));
            }
            chain.push(info);
            current = info;
        }
        Ok(chain)
    }

    /// Every class of the superclass chain, each followed by the interfaces
    /// it declares directly. Interfaces are not expanded transitively.
    pub fn classes_and_interfaces(&self, name: &str) -> Result<Vec<&TypeInfo>, HierarchyError> {
        let mut out = Vec::new();
        for class in self.superclasses(name)? {
            out.push(class);
            for iface in &class.interfaces {
                out.push(self.lookup(iface)?);
            }
        }
        Ok(out)
    }

    /// Splits the types reachable from `name` into interfaces and concrete
    /// classes, dropping abstract classes.
    pub fn partition_interfaces(&self, name: &str) -> Result<Partition, HierarchyError> {
        let (interfaces, concrete): (Vec<&TypeInfo>, Vec<&TypeInfo>) = partition_into(
            self.classes_and_interfaces(name)?
                .into_iter()
                .filter(|t| t.kind != TypeKind::Abstract),
            |t| t.kind == TypeKind::Interface,
        );

        let names = |v: Vec<&TypeInfo>| -> BTreeSet<String> {
            v.into_iter().map(|t| t.name.clone()).collect()
        };
        Ok(Partition {
            interfaces: names(interfaces),
            concrete: names(concrete),
        })
    }

    /// [`partition_interfaces`](Self::partition_interfaces) for several types
    /// at once, keyed by type name.
    pub fn partition_all<'a, I>(&self, names: I) -> Result<BTreeMap<String, Partition>, HierarchyError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .map(|n| self.partition_interfaces(n).map(|p| (n.to_owned(), p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|&s| s.to_owned()).collect()
    }

    fn names(v: &[&TypeInfo]) -> Vec<String> {
        v.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn array_list_chain() {
        let r = TypeRegistry::with_java_collections();
        let chain = r.superclasses("ArrayList").unwrap();
        assert_eq!(
            names(&chain),
            vec!["ArrayList", "AbstractList", "AbstractCollection", "Object"]
        );
    }

    #[test]
    fn array_list_partition() {
        let r = TypeRegistry::with_java_collections();
        let p = r.partition_interfaces("ArrayList").unwrap();
        assert_eq!(p.concrete, set(&["ArrayList", "Object"]));
        assert_eq!(
            p.interfaces,
            set(&["List", "RandomAccess", "Cloneable", "Serializable", "Collection"])
        );
    }

    #[test]
    fn several_types_at_once() {
        let r = TypeRegistry::with_java_collections();
        let all = r
            .partition_all(["ArrayList", "HashSet", "LinkedHashSet"])
            .unwrap();
        assert_eq!(all.len(), 3);

        assert_eq!(all["HashSet"].concrete, set(&["HashSet", "Object"]));
        assert_eq!(
            all["HashSet"].interfaces,
            set(&["Set", "Cloneable", "Serializable", "Collection"])
        );
        assert_eq!(
            all["LinkedHashSet"].concrete,
            set(&["LinkedHashSet", "HashSet", "Object"])
        );
        assert_eq!(all["LinkedHashSet"].interfaces, all["HashSet"].interfaces);
    }

    #[test]
    fn interfaces_are_not_expanded() {
        let r = TypeRegistry::with_java_collections();
        let p = r.partition_interfaces("ArrayList").unwrap();
        assert!(!p.interfaces.contains("Iterable"));
    }

    #[test]
    fn unknown_types() {
        let r = TypeRegistry::with_java_collections();
        assert_eq!(
            r.superclasses("TreeMap").unwrap_err(),
            HierarchyError::UnknownType("TreeMap".into())
        );

        let mut r = TypeRegistry::new();
        r.register(TypeInfo::class("Widget", None, &["Drawable"]));
        assert_eq!(
            r.partition_interfaces("Widget").unwrap_err(),
            HierarchyError::UnknownType("Drawable".into())
        );
    }

    #[test]
    fn unregistered_superclass_ends_the_chain() {
        let mut r = TypeRegistry::new();
        r.register(TypeInfo::class("Leaf", Some("Missing"), &[]));
        assert_eq!(names(&r.superclasses("Leaf").unwrap()), vec!["Leaf"]);
    }

    #[test]
    fn cycles_are_reported() {
        let mut r = TypeRegistry::new();
        r.register(TypeInfo::class("A", Some("B"), &[]));
        r.register(TypeInfo::class("B", Some("A"), &[]));
        assert_eq!(
            r.superclasses("A").unwrap_err(),
            HierarchyError::Cycle("A".into())
        );
    }

    #[test]
    fn register_replaces() {
        let mut r = TypeRegistry::with_java_collections();
        let n = r.len();
        let old = r.register(TypeInfo::class("Object", None, &["Serializable"]));
        assert_eq!(old.map(|t| t.interfaces.len()), Some(0));
        assert_eq!(r.len(), n);
    }
}
