// Copyright (c) 2017 King's College London
// created by the Software Development Team <http://soft-dev.org/>
//
// The Universal Permissive License (UPL), Version 1.0
//
// Subject to the condition set forth below, permission is hereby granted to any person obtaining a
// copy of this software, associated documentation and/or data (collectively the "Software"), free
// of charge and under any and all copyright rights in the Software, and any and all patent rights
// owned or freely licensable by each licensor hereunder covering either (i) the unmodified
// Software as contributed to or provided by such licensor, or (ii) the Larger Works (as defined
// below), to deal in both
//
// (a) the Software, and
// (b) any piece of software and/or hardware listed in the lrgrwrks.txt file
// if one is included with the Software (each a "Larger Work" to which the Software is contributed
// by such licensors),
//
// without restriction, including without limitation the rights to copy, create derivative works
// of, display, perform, and distribute the Software and make, use, sell, offer for sale, import,
// export, have made, and have sold the Software and the Larger Work(s), and to sublicense the
// foregoing rights on either these or other terms.
//
// This license is subject to the following condition: The above copyright notice and either this
// complete permission notice or at a minimum a reference to the UPL must be included in all copies
// or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
// BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! A canonical set of dotted items, its goto vector, its follow table,
//! and the interner that deduplicates kernels by structural equality.
//! Equality is keyed on the canonical sorted-items vector via a
//! `HashMap`, rather than a raw memory compare on unsorted storage, which
//! would be fragile.

use std::collections::HashMap;

use bit_vec::BitVec;

use crate::item::EncodedItem;
use crate::symbol::CIdx;

/// The non-closure items of an LR(0) item set, its per-component goto
/// table, and its (initially empty) per-item follow bitsets.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Kernel {
    items: Vec<EncodedItem>,
    goto: Vec<Option<usize>>,
    follows: Vec<BitVec>,
}

impl Kernel {
    /// Sorted, deduplicated array of encoded items; this is the kernel's
    /// canonical identity.
    pub fn items(&self) -> &[EncodedItem] {
        &self.items
    }

    pub fn goto(&self, c: CIdx) -> Option<usize> {
        self.goto[usize::from(c)]
    }

    pub fn goto_row(&self) -> &[Option<usize>] {
        &self.goto
    }

    /// One bitset of terminals per item in [`Kernel::items`], in the same
    /// order. Populated during LALR follow propagation; left empty here,
    /// since that population belongs to the follow phase.
    pub fn follows(&self) -> &[BitVec] {
        &self.follows
    }

    pub fn follows_mut(&mut self) -> &mut [BitVec] {
        &mut self.follows
    }

    pub(crate) fn set_goto(&mut self, goto: Vec<Option<usize>>) {
        self.goto = goto;
    }
}

/// The sole owner of all kernel storage. Assigns dense ids from 0 in
/// insertion order; kernel 0 is the start kernel.
#[derive(Debug, Default)]
pub struct KernelInterner {
    kernels: Vec<Kernel>,
    by_items: HashMap<Vec<EncodedItem>, usize>,
}

impl KernelInterner {
    pub fn new() -> KernelInterner {
        KernelInterner {
            kernels: Vec::new(),
            by_items: HashMap::new(),
        }
    }

    /// Interns `items` as a kernel. `items` is sorted and deduplicated
    /// in place to obtain the canonical form before lookup/insertion; the
    /// caller's `Vec` is absorbed on a successful insertion. Returns `None`
    /// (the "none" sentinel) for an empty `items`.
    pub fn intern(
        &mut self,
        mut items: Vec<EncodedItem>,
        terms_len: usize,
        component_count: usize,
    ) -> Option<usize> {
        if items.is_empty() {
            return None;
        }
        items.sort_unstable();
        items.dedup();

        if let Some(&id) = self.by_items.get(&items) {
            log::trace!("kernel intern: hit existing kernel {}", id);
            return Some(id);
        }

        let id = self.kernels.len();
        log::trace!("kernel intern: new kernel {} ({} items)", id, items.len());
        let follows = items.iter().map(|_| BitVec::from_elem(terms_len, false)).collect();
        let kernel = Kernel {
            items: items.clone(),
            goto: vec![None; component_count],
            follows,
        };
        self.by_items.insert(items, id);
        self.kernels.push(kernel);
        Some(id)
    }

    pub fn get(&self, id: usize) -> &Kernel {
        &self.kernels[id]
    }

    pub fn get_mut(&mut self, id: usize) -> &mut Kernel {
        &mut self.kernels[id]
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}
