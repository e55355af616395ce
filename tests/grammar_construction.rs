//! End-to-end grammar-construction tests, built from scratch through the
//! public `Grammar::build` entry point.

use pretty_assertions::assert_eq;

use lrtable::{Grammar, NTIdx, PIdx, Production, Symbol, TIdx};

fn nt(i: usize) -> Symbol {
    Symbol::Nonterminal(NTIdx(i))
}

fn t(i: usize) -> Symbol {
    Symbol::Terminal(TIdx(i))
}

/// S' -> S, S -> a.
#[test]
fn trivial_grammar() {
    let productions = vec![
        Production::new(NTIdx(0), vec![nt(1)]),
        Production::new(NTIdx(1), vec![t(0)]),
    ];
    let grm = Grammar::build(productions, 1, 2).expect("grammar builds");

    assert_eq!(grm.kernel_count(), 3);

    let comp_s = grm.component_index(nt(1));
    let comp_a = grm.component_index(t(0));
    let to_s_kernel = grm.kernel_goto(0, comp_s).unwrap();
    let to_a_kernel = grm.kernel_goto(0, comp_a).unwrap();
    assert_eq!(to_s_kernel, 1);
    assert_eq!(to_a_kernel, 2);

    assert_eq!(grm.kernel_items(1), &[grm.encode(PIdx(0), 1)]);
    assert_eq!(grm.kernel_items(2), &[grm.encode(PIdx(1), 1)]);

    assert!(grm.first_of(NTIdx(1)).get(0).unwrap());
    assert!(grm.first_of(NTIdx(0)).get(0).unwrap());
}

/// S' -> L, L -> L a | b.
#[test]
fn left_recursion() {
    let productions = vec![
        Production::new(NTIdx(0), vec![nt(1)]),
        Production::new(NTIdx(1), vec![nt(1), t(0)]),
        Production::new(NTIdx(1), vec![t(1)]),
    ];
    let grm = Grammar::build(productions, 2, 2).expect("grammar builds");

    assert!(grm.first_of(NTIdx(1)).get(1).unwrap());
    assert!(!grm.first_of(NTIdx(1)).get(0).unwrap());

    assert!(grm.generates(NTIdx(1), NTIdx(1)));
    assert!(!grm.generates(NTIdx(1), NTIdx(0)));

    assert_eq!(grm.kernel_count(), 4);

    let comp_l = grm.component_index(nt(1));
    let comp_a = grm.component_index(t(0));
    let after_l = grm.kernel_goto(0, comp_l).unwrap();
    let after_l_a = grm.kernel_goto(after_l, comp_a).unwrap();
    assert_eq!(grm.kernel_items(after_l_a), &[grm.encode(PIdx(1), 2)]);
}

/// S' -> E, E -> E + T | T, T -> id.
#[test]
fn branching_expression_grammar() {
    // Terminals: 0 = '+', 1 = 'id'.
    let productions = vec![
        Production::new(NTIdx(0), vec![nt(1)]),
        Production::new(NTIdx(1), vec![nt(1), t(0), nt(2)]),
        Production::new(NTIdx(1), vec![nt(2)]),
        Production::new(NTIdx(2), vec![t(1)]),
    ];
    let grm = Grammar::build(productions, 2, 3).expect("grammar builds");

    assert!(grm.first_of(NTIdx(1)).get(1).unwrap());
    assert!(!grm.first_of(NTIdx(1)).get(0).unwrap());
    assert!(grm.first_of(NTIdx(2)).get(1).unwrap());

    assert!(grm.generates(NTIdx(1), NTIdx(2)));

    assert_eq!(grm.kernel_count(), 6);

    let comp_id = grm.component_index(t(1));
    let to_t_reduce = grm.kernel_goto(0, comp_id).unwrap();
    assert_eq!(grm.kernel_items(to_t_reduce), &[grm.encode(PIdx(3), 1)]);
}

/// S' -> A, A -> epsilon | a.
#[test]
fn empty_production() {
    let productions = vec![
        Production::new(NTIdx(0), vec![nt(1)]),
        Production::new(NTIdx(1), vec![]),
        Production::new(NTIdx(1), vec![t(0)]),
    ];
    let grm = Grammar::build(productions, 1, 2).expect("grammar builds");

    assert!(grm.first_of(NTIdx(1)).get(0).unwrap());

    let comp_a = grm.component_index(t(0));
    let to_a_kernel = grm.kernel_goto(0, comp_a).unwrap();
    assert_eq!(grm.kernel_items(to_a_kernel), &[grm.encode(PIdx(2), 1)]);
}
