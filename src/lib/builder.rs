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

//! The worklist that seeds the start kernel, computes closures, and
//! interns goto'd successor kernels. Each component's pairs set is
//! a `BTreeSet`, which gives a sorted, deduplicated result for free instead
//! of an explicit insertion sort.

use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::grammarindex::{component_index, GrammarIndex};
use crate::item::ItemCodec;
use crate::kernel::KernelInterner;
use crate::production::Production;
use crate::symbol::{NTIdx, PIdx, Symbol};

/// Builds every reachable LR(0) kernel and its goto vector, starting from
/// the singleton kernel `{ encode(0, 0) }`.
pub fn build(
    index: &GrammarIndex,
    productions: &[Production],
    codec: &ItemCodec,
    nonterms_len: usize,
    terms_len: usize,
) -> KernelInterner {
    let component_count = nonterms_len + terms_len;
    let mut interner = KernelInterner::new();

    let start_code = codec.encode(PIdx(0), 0);
    let start_id = interner
        .intern(vec![start_code], terms_len, component_count)
        .expect("the start kernel's item set is never empty");
    debug_assert_eq!(start_id, 0, "the start kernel must be interned first");

    let mut worklist: VecDeque<usize> = VecDeque::new();
    let mut processed: HashSet<usize> = HashSet::new();
    worklist.push_back(start_id);

    while let Some(k_id) = worklist.pop_front() {
        if !processed.insert(k_id) {
            continue;
        }
        log::debug!(
            "lr0 builder: processing kernel {} ({} known so far)",
            k_id,
            interner.len()
        );

        let mut pairs: Vec<BTreeSet<i64>> = vec![BTreeSet::new(); component_count];
        let items = interner.get(k_id).items().to_vec();

        for &code in &items {
            let (p, k) = codec.decode(code);
            let rhs = productions[usize::from(p)].rhs();
            if k >= rhs.len() {
                continue;
            }
            let x = rhs[k];

            // Step 2: the item's own shift contributes (p, k+1).
            let c = component_index(nonterms_len, x);
            pairs[usize::from(c)].insert(codec.encode(p, k + 1));

            // Step 3: if X is a nonterminal, its closure contributes the
            // first item of every production of every nonterminal it (or
            // anything it generates-leftmost) can expand to.
            if let Symbol::Nonterminal(j) = x {
                contribute_closure(index, productions, codec, nonterms_len, j, &mut pairs);
            }
        }

        let mut goto_row = vec![None; component_count];
        for c in 0..component_count {
            let set = std::mem::take(&mut pairs[c]);
            if set.is_empty() {
                continue;
            }
            let sorted: Vec<i64> = set.into_iter().collect();
            if let Some(new_id) = interner.intern(sorted, terms_len, component_count) {
                goto_row[c] = Some(new_id);
                worklist.push_back(new_id);
            }
        }

        interner.get_mut(k_id).set_goto(goto_row);
    }

    interner
}

/// For nonterminal `j` and every `m` with `generates[j][m] = 1` (including
/// `j` itself), add `encode(q, 1)` for each production `q` of `m`, keyed by
/// the component of `q`'s leftmost symbol. Productions with an empty rhs
/// contribute nothing here.
fn contribute_closure(
    index: &GrammarIndex,
    productions: &[Production],
    codec: &ItemCodec,
    nonterms_len: usize,
    j: NTIdx,
    pairs: &mut [BTreeSet<i64>],
) {
    for m in 0..nonterms_len {
        let m = NTIdx(m);
        if m != j && !index.generates(j, m) {
            continue;
        }
        for &q in index.productions_of(m) {
            let rhs = productions[usize::from(q)].rhs();
            if let Some(&y) = rhs.first() {
                let cy = component_index(nonterms_len, y);
                pairs[usize::from(cy)].insert(codec.encode(q, 1));
            }
        }
    }
}
