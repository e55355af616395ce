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

//! An LR(0)/LALR(1) parser-generator back end: the grammar analysis engine
//! that, given a context-free grammar, constructs the canonical collection
//! of LR(0) item-set kernels and the goto relation between them, and
//! prepares the per-nonterminal FIRST sets LALR follow propagation needs.
//!
//! The lexer/front-end that produces productions and symbol tables, the
//! concrete syntax of grammar source files, the ACTION/GOTO table emitter,
//! diagnostic pretty-printing, and the command-line driver are all external
//! collaborators; this crate consumes a prebuilt list of productions and
//! symbols and exposes the constructed automaton.

mod builder;
mod error;
mod firsts;
mod grammarindex;
mod item;
mod kernel;
mod production;
mod symbol;

pub use crate::error::GrammarError;
pub use crate::item::EncodedItem;
pub use crate::production::Production;
pub use crate::symbol::{CIdx, NTIdx, PIdx, Symbol, TIdx};

use bit_vec::BitVec;

use crate::grammarindex::GrammarIndex;
use crate::item::ItemCodec;
use crate::kernel::KernelInterner;

/// A grammar that has passed construction: its productions, its
/// productions-by-nonterminal/generates index, its LR(0) kernel collection
/// with goto vectors, and its per-nonterminal FIRST sets. Immutable after
/// construction and safely shared by multiple readers.
#[derive(Debug)]
pub struct Grammar {
    terms_len: usize,
    nonterms_len: usize,
    productions: Vec<Production>,
    index: GrammarIndex,
    codec: ItemCodec,
    kernels: KernelInterner,
    first_sets: Vec<BitVec>,
}

impl Grammar {
    /// Builds a [`Grammar`] from a prebuilt list of `productions`, given the
    /// dense terminal and nonterminal counts those productions reference.
    /// Production 0 must be the augmented start production; this is
    /// the crate's sole entry point.
    pub fn build(
        productions: Vec<Production>,
        terms_len: usize,
        nonterms_len: usize,
    ) -> Result<Grammar, GrammarError> {
        if productions.is_empty() {
            log::warn!("grammar_build: no productions supplied");
            return Err(GrammarError::MissingStartProduction);
        }

        for (i, p) in productions.iter().enumerate() {
            if usize::from(p.lhs()) >= nonterms_len {
                log::warn!("production {} has an out-of-range lhs", i);
                return Err(GrammarError::IndexOutOfRange {
                    production: PIdx(i),
                });
            }
            for s in p.rhs() {
                let out_of_range = match s {
                    Symbol::Terminal(t) => usize::from(*t) >= terms_len,
                    Symbol::Nonterminal(n) => usize::from(*n) >= nonterms_len,
                };
                if out_of_range {
                    log::warn!("production {} references an out-of-range symbol", i);
                    return Err(GrammarError::IndexOutOfRange {
                        production: PIdx(i),
                    });
                }
            }
        }

        let index = GrammarIndex::build(nonterms_len, &productions)?;

        let start_lhs = productions[0].lhs();
        let start_rule_prods = index.productions_of(start_lhs);
        if start_rule_prods.len() != 1 || start_rule_prods[0] != PIdx(0) {
            log::warn!("production 0 is not the sole production of its nonterminal");
            return Err(GrammarError::MissingStartProduction);
        }

        let codec = ItemCodec::new(productions.len());
        let kernels = builder::build(&index, &productions, &codec, nonterms_len, terms_len);

        let nullable = firsts::compute_nullable(nonterms_len, index.productions_of_table(), &productions);
        let first_sets = (0..nonterms_len)
            .map(|i| {
                firsts::first_of(
                    NTIdx(i),
                    index.productions_of_table(),
                    &productions,
                    &nullable,
                    terms_len,
                )
            })
            .collect();

        Ok(Grammar {
            terms_len,
            nonterms_len,
            productions,
            index,
            codec,
            kernels,
            first_sets,
        })
    }

    /// `N + T`: the length of every kernel's goto vector.
    pub fn component_count(&self) -> usize {
        self.nonterms_len + self.terms_len
    }

    pub fn terms_len(&self) -> usize {
        self.terms_len
    }

    pub fn nonterms_len(&self) -> usize {
        self.nonterms_len
    }

    pub fn kernel_count(&self) -> usize {
        self.kernels.len()
    }

    /// The sorted, deduplicated array of encoded items that is kernel
    /// `id`'s canonical identity. Panics (via bounds-checked indexing)
    /// if `id` is out of range, which is a contract violation.
    pub fn kernel_items(&self, id: usize) -> &[EncodedItem] {
        self.kernels.get(id).items()
    }

    /// The successor kernel reached by shifting `component` from kernel
    /// `id`, or `None` if there is no such transition.
    pub fn kernel_goto(&self, id: usize, component: CIdx) -> Option<usize> {
        self.kernels.get(id).goto(component)
    }

    pub fn decode(&self, code: EncodedItem) -> (PIdx, usize) {
        self.codec.decode(code)
    }

    pub fn encode(&self, p: PIdx, k: usize) -> EncodedItem {
        self.codec.encode(p, k)
    }

    /// `FIRST(nonterminal)` as a dense bitset over `[0, terms_len)`.
    pub fn first_of(&self, nonterminal: NTIdx) -> &BitVec {
        &self.first_sets[usize::from(nonterminal)]
    }

    /// Maps a symbol to its unified goto-vector component index.
    pub fn component_index(&self, sym: Symbol) -> CIdx {
        grammarindex::component_index(self.nonterms_len, sym)
    }

    pub fn productions_of(&self, nonterminal: NTIdx) -> &[PIdx] {
        self.index.productions_of(nonterminal)
    }

    pub fn generates(&self, i: NTIdx, j: NTIdx) -> bool {
        self.index.generates(i, j)
    }

    pub fn prod(&self, p: PIdx) -> &Production {
        &self.productions[usize::from(p)]
    }

    pub fn prods_len(&self) -> usize {
        self.productions.len()
    }
}
