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

//! Bijection between dotted items `(production, dot offset)` and a single
//! totally-ordered integer.

use crate::symbol::PIdx;

/// A single encoded dotted item. Sorted arrays of these are the canonical
/// form a kernel is identified by.
pub type EncodedItem = i64;

/// Bijection between `(production index, dot offset)` pairs and
/// [`EncodedItem`]s, parameterised only by the number of productions in the
/// grammar.
#[derive(Clone, Copy, Debug)]
pub struct ItemCodec {
    prods_len: usize,
}

impl ItemCodec {
    pub fn new(prods_len: usize) -> ItemCodec {
        ItemCodec { prods_len }
    }

    /// `code = P*(k+1) - p - 1`. Smaller `k` sorts before larger `k`; ties
    /// within the same `k` break by larger `p` sorting first.
    pub fn encode(&self, p: PIdx, k: usize) -> EncodedItem {
        let prods_len = self.prods_len as i64;
        let p = usize::from(p) as i64;
        let k = k as i64;
        prods_len * (k + 1) - p - 1
    }

    /// Inverse of [`ItemCodec::encode`]. Decoding a code outside the range
    /// produced by `encode` for this grammar's production count is a
    /// programmer error: it asserts in debug builds and, in release builds,
    /// still returns a `(PIdx, usize)` pair rather than indexing out of
    /// bounds or invoking undefined behaviour.
    pub fn decode(&self, code: EncodedItem) -> (PIdx, usize) {
        debug_assert!(self.prods_len > 0, "decode: grammar has no productions");
        let prods_len = self.prods_len as i64;
        let k = code.div_euclid(prods_len);
        let p = prods_len - code.rem_euclid(prods_len) - 1;
        debug_assert!(
            k >= 0 && p >= 0 && (p as usize) < self.prods_len,
            "decode: code {} is out of range for {} productions",
            code,
            self.prods_len
        );
        (PIdx(p.max(0) as usize), k.max(0) as usize)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let codec = ItemCodec::new(4);
        for p in 0..4 {
            for k in 0..5 {
                let code = codec.encode(PIdx(p), k);
                assert_eq!(codec.decode(code), (PIdx(p), k));
            }
        }
    }

    #[test]
    fn smaller_offset_sorts_first() {
        let codec = ItemCodec::new(4);
        assert!(codec.encode(PIdx(0), 0) < codec.encode(PIdx(0), 1));
        assert!(codec.encode(PIdx(3), 0) < codec.encode(PIdx(0), 1));
    }

    #[test]
    fn ties_within_offset_break_by_descending_production() {
        let codec = ItemCodec::new(4);
        // Same k: larger p encodes smaller.
        assert!(codec.encode(PIdx(3), 1) < codec.encode(PIdx(0), 1));
        assert!(codec.encode(PIdx(2), 1) < codec.encode(PIdx(1), 1));
    }
}
