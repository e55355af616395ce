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

//! Symbol identity and classification, and the dense index newtypes used
//! throughout the crate for the component-index contract.

use std::fmt;

/// A dense, zero-based index into the terminal table, in `[0, T)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TIdx(pub usize);

/// A dense, zero-based index into the nonterminal table, in `[0, N)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NTIdx(pub usize);

/// A stable, insertion-order index into the production table, in `[0, P)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct PIdx(pub usize);

/// A unified component index used by goto vectors: nonterminals occupy
/// `[0, N)`, terminals occupy `[N, N+T)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct CIdx(pub usize);

macro_rules! idx_newtype {
    ($t:ident) => {
        impl From<usize> for $t {
            fn from(v: usize) -> $t {
                $t(v)
            }
        }

        impl From<$t> for usize {
            fn from(v: $t) -> usize {
                v.0
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

idx_newtype!(TIdx);
idx_newtype!(NTIdx);
idx_newtype!(PIdx);
idx_newtype!(CIdx);

/// A grammar symbol: either a terminal or a nonterminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    Terminal(TIdx),
    Nonterminal(NTIdx),
}

impl Symbol {
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn idx_roundtrips_through_usize() {
        let t = TIdx::from(3);
        assert_eq!(usize::from(t), 3);
        assert_eq!(format!("{}", t), "3");
    }

    #[test]
    fn symbol_classification() {
        assert!(Symbol::Nonterminal(NTIdx(0)).is_nonterminal());
        assert!(!Symbol::Nonterminal(NTIdx(0)).is_terminal());
        assert!(Symbol::Terminal(TIdx(0)).is_terminal());
    }
}
