//! Call-site extraction with best-effort receiver resolution.
//!
//! Receiver owners are decided in this order:
//! 1. a qualifier naming a known variable, field or parameter takes its
//!    declared type;
//! 2. any other qualifier is taken literally, or by its first segment when
//!    that segment starts with an uppercase letter (`Foo.Bar.baz()` -> `Foo`);
//! 3. a chain rooted at `new T(..)` or `T.class` resolves to `T`;
//! 4. a chain rooted at a string literal resolves to `String`;
//! 5. any other receiver expression takes the owner of the previous callee
//!    recorded for the same caller, which needs the project-wide graph and
//!    is therefore deferred ([`Callee::Chained`]);
//! 6. an unqualified call (or one on `this`) stays in the caller's class.
//!
//! Calls on `super` are not recorded.

use std::rc::Rc;

use ir::{CallGraph, NodeId, UNRESOLVED_OWNER};
use tree_sitter::Node;

use super::symbol_table::TypeLookup;
use super::{field_text, node_text, simple_type_name, CLASS_LIKE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    Resolved(NodeId),
    /// Receiver owner comes from the caller's previous callee.
    Chained { member: String },
}

impl Callee {
    /// Final callee id. A chained callee is resolved against the edges
    /// already pushed for `caller`, so calls must be resolved in order.
    pub fn resolve(self, caller: &NodeId, graph: &CallGraph) -> NodeId {
        match self {
            Callee::Resolved(id) => id,
            Callee::Chained { member } => {
                let owner = graph
                    .last_callee(caller)
                    .map(|prev| prev.owner.clone())
                    .unwrap_or_else(|| UNRESOLVED_OWNER.to_string());
                NodeId::new(owner, member)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub caller: NodeId,
    pub callee: Callee,
}

/// Every method invocation in the tree, in the order the graph should
/// record them. The links of a call chain come first, innermost to
/// outermost, then the calls inside their argument lists.
///
/// The walk keeps its own stack, so nesting depth is bounded by memory
/// rather than by the thread stack.
pub fn extract_calls<'a, T: TypeLookup + ?Sized>(
    root: Node<'a>,
    src: &'a str,
    symbols: &T,
) -> Vec<CallSite> {
    let mut sites = Vec::new();
    let mut stack = vec![Step::Visit(root, Scope::outside())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Emit(site) => sites.push(site),
            Step::Visit(node, scope) => {
                let scope = scope.enter(node, src);
                // links below a chain top are never visited on their own
                if is_chain_kind(node.kind()) {
                    push_chain(node, src, symbols, &scope, &mut stack);
                } else {
                    push_children(node, &scope, &mut stack, |_| true);
                }
            }
        }
    }
    sites
}

/// Pending work of the call walk. Items are popped in output order.
enum Step<'a> {
    Visit(Node<'a>, Scope<'a>),
    Emit(CallSite),
}

/// Nearest class-like name and the caller every call below belongs to.
#[derive(Clone)]
struct Scope<'a> {
    class: Option<&'a str>,
    caller: Rc<NodeId>,
}

impl<'a> Scope<'a> {
    fn outside() -> Self {
        Self {
            class: None,
            caller: Rc::new(NodeId::unknown()),
        }
    }

    /// Scope for the children of `node`. Class-like declarations rename the
    /// class; method declarations start a new caller, which nested classes
    /// outside a method body keep.
    fn enter(&self, node: Node, src: &'a str) -> Self {
        let kind = node.kind();
        if CLASS_LIKE.contains(&kind) {
            return Self {
                class: field_text(node, "name", src),
                caller: Rc::clone(&self.caller),
            };
        }
        if kind == "method_declaration" {
            let caller = match (self.class, field_text(node, "name", src)) {
                (Some(class), Some(method)) => NodeId::new(class, method),
                _ => NodeId::unknown(),
            };
            return Self {
                class: self.class,
                caller: Rc::new(caller),
            };
        }
        self.clone()
    }
}

/// Pushes the named children of `node` so they pop in source order.
fn push_children<'a>(
    node: Node<'a>,
    scope: &Scope<'a>,
    stack: &mut Vec<Step<'a>>,
    keep: impl Fn(Node<'a>) -> bool,
) {
    let mut cursor = node.walk();
    let children: Vec<Node<'a>> = node
        .named_children(&mut cursor)
        .filter(|c| keep(*c))
        .collect();
    stack.extend(
        children
            .into_iter()
            .rev()
            .map(|child| Step::Visit(child, scope.clone())),
    );
}

fn is_chain_kind(kind: &str) -> bool {
    matches!(kind, "method_invocation" | "field_access")
}

/// Schedules a whole receiver chain: the subtree under its root, the call
/// of every link innermost first, then the argument lists. Arguments of
/// the outer links come before those of the first link when that link is
/// called on a plain name or on nothing (`a.f(x()).g(y())` gives `f, g,
/// y, x`); otherwise they follow link order.
fn push_chain<'a, T: TypeLookup + ?Sized>(
    top: Node<'a>,
    src: &'a str,
    symbols: &T,
    scope: &Scope<'a>,
    stack: &mut Vec<Step<'a>>,
) {
    let mut links = vec![top];
    let mut cur = top;
    while is_chain_kind(cur.kind()) {
        match cur.child_by_field_name("object") {
            Some(object) => {
                links.push(object);
                cur = object;
            }
            None => break,
        }
    }
    links.reverse();

    let calls: Vec<Node<'a>> = links
        .iter()
        .copied()
        .filter(|l| l.kind() == "method_invocation")
        .collect();
    let named_first = calls.first().is_some_and(|first| {
        first
            .child_by_field_name("object")
            .map_or(true, |o| qualifier_text(o, src).is_some())
    });
    let mut argument_order: Vec<Node<'a>> = Vec::with_capacity(calls.len());
    if named_first {
        argument_order.extend(calls.iter().skip(1).copied());
        argument_order.extend(calls.first().copied());
    } else {
        argument_order.extend(calls.iter().copied());
    }

    for link in argument_order.into_iter().rev() {
        let object = link.child_by_field_name("object").map(|o| o.id());
        let name = link.child_by_field_name("name").map(|n| n.id());
        push_children(link, scope, stack, |c| Some(c.id()) != object && Some(c.id()) != name);
    }

    let sites: Vec<CallSite> = calls
        .iter()
        .filter_map(|link| call_site(*link, links[0], src, symbols, &scope.caller))
        .collect();
    stack.extend(sites.into_iter().rev().map(Step::Emit));

    if !is_chain_kind(links[0].kind()) {
        stack.push(Step::Visit(links[0], scope.clone()));
    }
}

/// `None` for a missing name and for `super` calls, which never enter the
/// graph. `root` is the innermost node of the chain `node` belongs to.
fn call_site<T: TypeLookup + ?Sized>(
    node: Node,
    root: Node,
    src: &str,
    symbols: &T,
    caller: &NodeId,
) -> Option<CallSite> {
    let member = field_text(node, "name", src)?;
    let callee = match node.child_by_field_name("object") {
        None => Callee::Resolved(NodeId::new(caller.owner.clone(), member)),
        Some(object) if object.kind() == "super" => return None,
        Some(object) => receiver(object, root, src, symbols, caller, member),
    };
    Some(CallSite {
        caller: caller.clone(),
        callee,
    })
}

fn receiver<T: TypeLookup + ?Sized>(
    object: Node,
    root: Node,
    src: &str,
    symbols: &T,
    caller: &NodeId,
    member: &str,
) -> Callee {
    if object.kind() == "this" {
        return Callee::Resolved(NodeId::new(caller.owner.clone(), member));
    }
    if let Some(qualifier) = qualifier_text(object, src) {
        let owner = match symbols.type_of(&qualifier) {
            Some(ty) => simple_type_name(ty),
            None => static_owner(&qualifier),
        };
        return Callee::Resolved(NodeId::new(owner, member));
    }

    let literal_owner = match root.kind() {
        "object_creation_expression" => field_text(root, "type", src).map(simple_type_name),
        "class_literal" => {
            let mut cursor = root.walk();
            let ty = root.named_children(&mut cursor).next();
            ty.and_then(|t| node_text(t, src)).map(simple_type_name)
        }
        "string_literal" | "text_block" => Some("String".to_string()),
        _ => None,
    };
    match literal_owner {
        Some(owner) => Callee::Resolved(NodeId::new(owner, member)),
        None => Callee::Chained {
            member: member.to_string(),
        },
    }
}

/// Dotted name for receivers made only of identifiers, with a leading
/// `this.` dropped.
fn qualifier_text(node: Node, src: &str) -> Option<String> {
    let mut parts = Vec::new();
    let mut cur = node;
    loop {
        match cur.kind() {
            "identifier" => {
                parts.push(node_text(cur, src)?);
                break;
            }
            "field_access" => {
                parts.push(field_text(cur, "field", src)?);
                let object = cur.child_by_field_name("object")?;
                if object.kind() == "this" {
                    break;
                }
                cur = object;
            }
            _ => return None,
        }
    }
    parts.reverse();
    Some(parts.join("."))
}

fn static_owner(qualifier: &str) -> String {
    match qualifier.split_once('.') {
        Some((head, _)) if head.starts_with(|c: char| c.is_uppercase()) => head.to_string(),
        _ => qualifier.to_string(),
    }
}
