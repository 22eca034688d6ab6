/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Member accessibility: "is member M, reached via type V, visible from
//! context type C?"

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::types::{AssemblyId, TypeId, TypeUniverse};

/// Declared accessibility of a member or accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    /// Visible everywhere.
    Public,
    /// Visible only on the declaring type itself.
    Private,
    /// Visible to derived types within the same assembly or a friend.
    Protected,
    /// Visible within the same assembly or a friend.
    Internal,
    /// Visible to same-assembly-or-friend, or to derived types anywhere.
    ProtectedOrInternal,
    /// Visible to derived types, but only within same-assembly-or-friend.
    ProtectedAndInternal,
}

/// Accessibility oracle for one synthesis session.
///
/// The derives-from relation memoizes per (type, type) and friendship per
/// (assembly, assembly) for the checker's lifetime. Without a context type
/// every member is treated as accessible.
#[derive(Debug)]
pub struct AccessibilityChecker {
    context: Option<TypeId>,
    derives: RefCell<FxHashMap<(TypeId, TypeId), bool>>,
    friendships: RefCell<FxHashMap<(AssemblyId, AssemblyId), bool>>,
}

impl AccessibilityChecker {
    /// Checker evaluating from `context`; `None` is the permissive default.
    pub fn new(context: Option<TypeId>) -> Self {
        Self {
            context,
            derives: RefCell::new(FxHashMap::default()),
            friendships: RefCell::new(FxHashMap::default()),
        }
    }

    /// The context type queries evaluate from.
    pub fn context_type(&self) -> Option<TypeId> {
        self.context
    }

    /// Whether a member declared `declared` on `declared_on`, reached via
    /// `via`, is visible from the session's context type.
    pub fn is_accessible(
        &self,
        universe: &TypeUniverse,
        declared: Accessibility,
        declared_on: TypeId,
        via: TypeId,
    ) -> bool {
        let Some(context) = self.context else {
            return true;
        };
        match declared {
            Accessibility::Public => true,
            Accessibility::Private => declared_on == context,
            Accessibility::Protected => {
                self.same_assembly_or_friend(universe, declared_on, context)
                    && self.protected_grant(universe, declared_on, via, context)
            }
            Accessibility::Internal => {
                self.same_assembly_or_friend(universe, declared_on, context)
            }
            Accessibility::ProtectedOrInternal => {
                self.same_assembly_or_friend(universe, declared_on, context)
                    || self.protected_grant(universe, declared_on, via, context)
            }
            Accessibility::ProtectedAndInternal => {
                self.same_assembly_or_friend(universe, declared_on, context)
                    && self.protected_grant(universe, declared_on, via, context)
            }
        }
    }

    // The context must derive from the declaring type and, unless it is the
    // declaring type itself, reach the member through itself or a descendant.
    fn protected_grant(
        &self,
        universe: &TypeUniverse,
        declared_on: TypeId,
        via: TypeId,
        context: TypeId,
    ) -> bool {
        self.derives(universe, context, declared_on)
            && (declared_on == context || self.derives(universe, via, context))
    }

    fn derives(&self, universe: &TypeUniverse, ty: TypeId, ancestor: TypeId) -> bool {
        if let Some(known) = self.derives.borrow().get(&(ty, ancestor)) {
            return *known;
        }
        let result = universe.derives_from(ty, ancestor);
        self.derives.borrow_mut().insert((ty, ancestor), result);
        result
    }

    fn same_assembly_or_friend(
        &self,
        universe: &TypeUniverse,
        declared_on: TypeId,
        context: TypeId,
    ) -> bool {
        let origin = universe.type_def(declared_on).assembly;
        let observer = universe.type_def(context).assembly;
        if let Some(known) = self.friendships.borrow().get(&(origin, observer)) {
            return *known;
        }
        let result = origin == observer || {
            let observer_name = &universe.assembly(observer).name;
            universe
                .assembly(origin)
                .friends
                .iter()
                .any(|friend| friend == observer_name)
        };
        self.friendships
            .borrow_mut()
            .insert((origin, observer), result);
        result
    }

    // Memo table sizes, for asserting cache stability.
    pub(crate) fn memo_sizes(&self) -> (usize, usize) {
        (self.derives.borrow().len(), self.friendships.borrow().len())
    }
}
