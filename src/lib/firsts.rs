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

//! Per-nonterminal FIRST sets, which seed LALR follow propagation.
//! A naive traversal stops at a leading nonterminal unconditionally, which
//! under-approximates FIRST for grammars with nullable nonterminals; the
//! ε-chaining below fixes that by tracking which nonterminals are
//! nullable and continuing the scan across them.

use bit_vec::BitVec;

use crate::production::Production;
use crate::symbol::{NTIdx, PIdx, Symbol};

/// A nonterminal is nullable when it can derive the empty string: it has a
/// production with an empty rhs, or a production every one of whose
/// symbols is itself nullable. Computed by fixpoint.
pub fn compute_nullable(
    nonterms_len: usize,
    productions_of: &[Vec<PIdx>],
    productions: &[Production],
) -> BitVec {
    let mut nullable = BitVec::from_elem(nonterms_len, false);
    loop {
        let mut changed = false;
        for i in 0..nonterms_len {
            if nullable.get(i).unwrap_or(false) {
                continue;
            }
            let is_nullable = productions_of[i].iter().any(|&p| {
                productions[usize::from(p)].rhs().iter().all(|s| match s {
                    Symbol::Terminal(_) => false,
                    Symbol::Nonterminal(n) => nullable.get(usize::from(*n)).unwrap_or(false),
                })
            });
            if is_nullable {
                nullable.set(i, true);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    nullable
}

/// `FIRST(a)`: the terminal indices that can begin some derivation of `a`,
/// as a dense bitset over `[0, T)`.
///
/// Uses a per-query "tried productions" bitmap (discarded after the query)
/// to avoid non-termination on left-recursive grammars. A leading
/// nullable nonterminal does not stop the scan: the traversal keeps walking
/// across a production's nullable leading symbols, only stopping once it
/// passes (and includes) the first non-nullable symbol.
pub fn first_of(
    a: NTIdx,
    productions_of: &[Vec<PIdx>],
    productions: &[Production],
    nullable: &BitVec,
    terms_len: usize,
) -> BitVec {
    let mut table = BitVec::from_elem(terms_len, false);
    let mut tried = vec![false; productions.len()];
    mark_firsts(a, productions_of, productions, nullable, &mut table, &mut tried);
    table
}

fn mark_firsts(
    a: NTIdx,
    productions_of: &[Vec<PIdx>],
    productions: &[Production],
    nullable: &BitVec,
    table: &mut BitVec,
    tried: &mut [bool],
) {
    for &p in &productions_of[usize::from(a)] {
        let pi = usize::from(p);
        if tried[pi] {
            continue;
        }
        tried[pi] = true;

        for sym in productions[pi].rhs() {
            match sym {
                Symbol::Terminal(t) => {
                    table.set(usize::from(*t), true);
                    break;
                }
                Symbol::Nonterminal(b) => {
                    mark_firsts(*b, productions_of, productions, nullable, table, tried);
                    if !nullable.get(usize::from(*b)).unwrap_or(false) {
                        break;
                    }
                    // `b` is nullable: keep scanning the rest of this rhs.
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grammarindex::GrammarIndex;

    fn nt(i: usize) -> Symbol {
        Symbol::Nonterminal(NTIdx(i))
    }

    fn t(i: usize) -> Symbol {
        Symbol::Terminal(crate::symbol::TIdx(i))
    }

    /// S' -> S, S -> a. FIRST(S) = FIRST(S') = {a}.
    #[test]
    fn trivial_grammar_firsts() {
        let productions = vec![
            Production::new(NTIdx(0), vec![nt(1)]),
            Production::new(NTIdx(1), vec![t(0)]),
        ];
        let index = GrammarIndex::build(2, &productions).unwrap();
        let nullable = compute_nullable(2, index.productions_of_table(), &productions);
        let first_s = first_of(NTIdx(1), index.productions_of_table(), &productions, &nullable, 1);
        let first_start = first_of(NTIdx(0), index.productions_of_table(), &productions, &nullable, 1);
        assert!(first_s.get(0).unwrap());
        assert!(first_start.get(0).unwrap());
    }

    /// S' -> L, L -> L a | b. FIRST(L) = {b}.
    #[test]
    fn left_recursive_grammar_firsts() {
        let productions = vec![
            Production::new(NTIdx(0), vec![nt(1)]),
            Production::new(NTIdx(1), vec![nt(1), t(0)]),
            Production::new(NTIdx(1), vec![t(1)]),
        ];
        let index = GrammarIndex::build(2, &productions).unwrap();
        let nullable = compute_nullable(2, index.productions_of_table(), &productions);
        let first_l = first_of(NTIdx(1), index.productions_of_table(), &productions, &nullable, 2);
        assert!(!first_l.get(0).unwrap());
        assert!(first_l.get(1).unwrap());
    }

    /// S' -> A, A -> epsilon | a. FIRST(A) = {a}; A is nullable.
    #[test]
    fn empty_production_makes_nonterminal_nullable_but_does_not_block_first() {
        let productions = vec![
            Production::new(NTIdx(0), vec![nt(1)]),
            Production::new(NTIdx(1), vec![]),
            Production::new(NTIdx(1), vec![t(0)]),
        ];
        let index = GrammarIndex::build(2, &productions).unwrap();
        let nullable = compute_nullable(2, index.productions_of_table(), &productions);
        assert!(nullable.get(1).unwrap());
        assert!(!nullable.get(0).unwrap());

        let first_a = first_of(NTIdx(1), index.productions_of_table(), &productions, &nullable, 1);
        assert!(first_a.get(0).unwrap());
    }

    /// A nullable leading nonterminal must not block the terminal that
    /// follows it in the same production from entering FIRST (the
    /// ε-chaining behavior).
    #[test]
    fn epsilon_chaining_reaches_past_a_nullable_leading_nonterminal() {
        // S -> E c; E -> epsilon.
        let productions = vec![
            Production::new(NTIdx(0), vec![nt(1)]),
            Production::new(NTIdx(1), vec![nt(2), t(0)]),
            Production::new(NTIdx(2), vec![]),
        ];
        let index = GrammarIndex::build(3, &productions).unwrap();
        let nullable = compute_nullable(3, index.productions_of_table(), &productions);
        assert!(nullable.get(2).unwrap());

        let first_of_1 = first_of(NTIdx(1), index.productions_of_table(), &productions, &nullable, 1);
        assert!(first_of_1.get(0).unwrap(), "FIRST must include c reached past nullable E");
    }
}
