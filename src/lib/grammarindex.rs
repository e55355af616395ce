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

//! Productions-by-nonterminal map and the transitive "generates-leftmost"
//! closure. Re-architected from a mutually-recursive formulation
//! into an iterative worklist over `(generator, generated)` pairs, which
//! avoids deep recursion on pathological grammars.

use std::collections::VecDeque;

use bit_vec::BitVec;

use crate::error::GrammarError;
use crate::production::Production;
use crate::symbol::{CIdx, NTIdx, PIdx, Symbol};

/// Maps a symbol to its unified goto-vector component index: nonterminals
/// occupy `[0, N)`, terminals occupy `[N, N+T)`.
pub fn component_index(nonterms_len: usize, sym: Symbol) -> CIdx {
    match sym {
        Symbol::Nonterminal(i) => CIdx(usize::from(i)),
        Symbol::Terminal(i) => CIdx(nonterms_len + usize::from(i)),
    }
}

/// The productions-by-nonterminal map and the `generates` relation.
#[derive(Debug)]
pub struct GrammarIndex {
    productions_of: Vec<Vec<PIdx>>,
    generates: Vec<BitVec>,
}

impl GrammarIndex {
    /// Groups `productions` by LHS (preserving insertion order within a
    /// nonterminal), verifies every nonterminal has at least one production,
    /// then saturates the `generates` relation.
    pub fn build(
        nonterms_len: usize,
        productions: &[Production],
    ) -> Result<GrammarIndex, GrammarError> {
        let mut productions_of: Vec<Vec<PIdx>> = vec![Vec::new(); nonterms_len];
        for (i, p) in productions.iter().enumerate() {
            productions_of[usize::from(p.lhs())].push(PIdx(i));
        }

        for (i, prods) in productions_of.iter().enumerate() {
            if prods.is_empty() {
                log::warn!("nonterminal {} has no productions", i);
                return Err(GrammarError::EmptyNonterminal(NTIdx(i)));
            }
        }

        let generates = compute_generates(nonterms_len, &productions_of, productions);

        Ok(GrammarIndex {
            productions_of,
            generates,
        })
    }

    pub fn productions_of(&self, i: NTIdx) -> &[PIdx] {
        &self.productions_of[usize::from(i)]
    }

    /// All productions grouped by nonterminal, in nonterminal-index order.
    /// Exposed for the FIRST-set analyser, which walks every nonterminal's
    /// productions directly.
    pub fn productions_of_table(&self) -> &[Vec<PIdx>] {
        &self.productions_of
    }

    pub fn generates(&self, i: NTIdx, j: NTIdx) -> bool {
        self.generates[usize::from(i)]
            .get(usize::from(j))
            .unwrap_or(false)
    }
}

/// Reflexive-transitive closure of "nonterminal `i`'s leftmost symbol can be
/// nonterminal `j`". Initialises the diagonal, seeds the immediate
/// edges from each production's leftmost symbol, then saturates with a
/// worklist: `generates[i][j]` and a newly discovered `generates[j][k]` imply
/// `generates[i][k]`, in both directions (any generator of `i`, and anything
/// `j` generates).
fn compute_generates(
    nonterms_len: usize,
    productions_of: &[Vec<PIdx>],
    productions: &[Production],
) -> Vec<BitVec> {
    let mut generates: Vec<BitVec> = (0..nonterms_len)
        .map(|_| BitVec::from_elem(nonterms_len, false))
        .collect();
    for i in 0..nonterms_len {
        generates[i].set(i, true);
    }

    let mut worklist: VecDeque<(usize, usize)> = VecDeque::new();
    for (i, prods) in productions_of.iter().enumerate() {
        for &p in prods {
            if let Some(Symbol::Nonterminal(j)) = productions[usize::from(p)].rhs().first() {
                let j = usize::from(*j);
                if !generates[i].get(j).unwrap_or(false) {
                    generates[i].set(j, true);
                    worklist.push_back((i, j));
                }
            }
        }
    }

    while let Some((i, j)) = worklist.pop_front() {
        // Every nonterminal that generates `i` also generates `j`.
        for k in 0..nonterms_len {
            if generates[k].get(i).unwrap_or(false) && !generates[k].get(j).unwrap_or(false) {
                generates[k].set(j, true);
                worklist.push_back((k, j));
            }
        }
        // Everything `j` generates, `i` also generates.
        for m in 0..nonterms_len {
            if generates[j].get(m).unwrap_or(false) && !generates[i].get(m).unwrap_or(false) {
                generates[i].set(m, true);
                worklist.push_back((i, m));
            }
        }
    }

    generates
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::symbol::TIdx;

    fn nt(i: usize) -> Symbol {
        Symbol::Nonterminal(NTIdx(i))
    }

    fn t(i: usize) -> Symbol {
        Symbol::Terminal(TIdx(i))
    }

    #[test]
    fn empty_nonterminal_is_rejected() {
        // Nonterminal 1 has no productions.
        let prods = vec![Production::new(NTIdx(0), vec![nt(1)])];
        let err = GrammarIndex::build(2, &prods).unwrap_err();
        assert_eq!(err, GrammarError::EmptyNonterminal(NTIdx(1)));
    }

    #[test]
    fn generates_diagonal_is_always_set() {
        let prods = vec![Production::new(NTIdx(0), vec![t(0)])];
        let idx = GrammarIndex::build(1, &prods).unwrap();
        assert!(idx.generates(NTIdx(0), NTIdx(0)));
    }

    #[test]
    fn generates_is_transitive() {
        // 0 -> 1 (leftmost), 1 -> 2 (leftmost), 2 -> terminal.
        let prods = vec![
            Production::new(NTIdx(0), vec![nt(1)]),
            Production::new(NTIdx(1), vec![nt(2)]),
            Production::new(NTIdx(2), vec![t(0)]),
        ];
        let idx = GrammarIndex::build(3, &prods).unwrap();
        assert!(idx.generates(NTIdx(0), NTIdx(1)));
        assert!(idx.generates(NTIdx(0), NTIdx(2)));
        assert!(idx.generates(NTIdx(1), NTIdx(2)));
        assert!(!idx.generates(NTIdx(2), NTIdx(0)));
        assert!(!idx.generates(NTIdx(1), NTIdx(0)));
    }

    #[test]
    fn self_referential_nonterminal_does_not_diverge() {
        // L -> L a | b (left recursion).
        let prods = vec![
            Production::new(NTIdx(0), vec![nt(0), t(0)]),
            Production::new(NTIdx(0), vec![t(1)]),
        ];
        let idx = GrammarIndex::build(1, &prods).unwrap();
        assert!(idx.generates(NTIdx(0), NTIdx(0)));
    }

    #[test]
    fn component_index_orders_nonterminals_before_terminals() {
        assert_eq!(component_index(3, nt(1)), CIdx(1));
        assert_eq!(component_index(3, t(0)), CIdx(3));
        assert_eq!(component_index(3, t(2)), CIdx(5));
    }
}
