use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::*;

type LabelledMol = Mol<WithCipLabel<Atom>, WithCipLabel<Bond>>;

fn atom(mol: &mut LabelledMol, z: u8, h: u8) -> NodeIndex {
    mol.add_atom(Atom::new(z, h).into())
}

fn single(mol: &mut LabelledMol, a: NodeIndex, b: NodeIndex) -> EdgeIndex {
    mol.add_bond(a, b, Bond::default().into())
}

fn double(mol: &mut LabelledMol, a: NodeIndex, b: NodeIndex) -> EdgeIndex {
    mol.add_bond(a, b, Bond::double().into())
}

fn n(idx: NodeIndex) -> AtomId {
    AtomId::Node(idx)
}

fn center(mol: &mut LabelledMol, at: NodeIndex, above: [AtomId; 4]) {
    mol.add_tetrahedral_stereo(TetrahedralStereo { center: at, above });
}

fn label(mol: &LabelledMol, idx: NodeIndex) -> Option<CipDescriptor> {
    mol.atom(idx).cip_label()
}

fn run(mol: &mut LabelledMol) -> CipResults {
    assign_cip(mol, &CipConfig::default())
}

#[test]
fn mol_add_atoms_and_bonds() {
    let mut mol = Mol::<Atom, Bond>::new();
    let c = mol.add_atom(Atom::new(6, 2));
    let o = mol.add_atom(Atom::new(8, 0));
    let bond_idx = mol.add_bond(c, o, Bond::double());

    assert_eq!(mol.atom_count(), 2);
    assert_eq!(mol.bond_count(), 1);
    assert_eq!(mol.atom(c).atomic_num, 6);
    assert_eq!(mol.atom(o).atomic_num, 8);
    assert_eq!(mol.bond(bond_idx).order, BondOrder::Double);
    assert_eq!(mol.bond_between(c, o), Some(bond_idx));
}

/// CH(Cl)(OH)CH3, atoms added center first.
fn chloroethanol(above_order: [usize; 4]) -> (LabelledMol, NodeIndex) {
    let mut mol = LabelledMol::new();
    let c = atom(&mut mol, 6, 1);
    let cl = atom(&mut mol, 17, 0);
    let o = atom(&mut mol, 8, 1);
    let me = atom(&mut mol, 6, 3);
    single(&mut mol, c, cl);
    single(&mut mol, c, o);
    single(&mut mol, c, me);
    let ligands = [AtomId::VirtualH(c, 0), n(cl), n(o), n(me)];
    center(&mut mol, c, above_order.map(|i| ligands[i]));
    (mol, c)
}

#[test]
fn simple_center_decided_by_atomic_number() {
    let (mut mol, c) = chloroethanol([0, 1, 2, 3]);
    let results = run(&mut mol);
    let expected = CipDescriptor::new(CipLabel::R, Rule::R1a);
    assert_eq!(results.atom(c), Some(expected));
    assert_eq!(label(&mol, c), Some(expected));
    assert_eq!(results.atoms.len(), 1);
    assert!(results.bonds.is_empty());
}

#[test]
fn swapping_two_ligands_inverts() {
    let (mut mol, c) = chloroethanol([0, 2, 1, 3]);
    run(&mut mol);
    assert_eq!(label(&mol, c).map(|d| d.label), Some(CipLabel::S));
    // An even permutation of the same annotation keeps the label.
    let (mut mol, c) = chloroethanol([1, 2, 0, 3]);
    run(&mut mol);
    assert_eq!(label(&mol, c).map(|d| d.label), Some(CipLabel::R));
}

#[test]
fn insertion_order_does_not_matter() {
    let mut mol = LabelledMol::new();
    let me = atom(&mut mol, 6, 3);
    let o = atom(&mut mol, 8, 1);
    let c = atom(&mut mol, 6, 1);
    let cl = atom(&mut mol, 17, 0);
    single(&mut mol, me, c);
    single(&mut mol, cl, c);
    single(&mut mol, o, c);
    center(&mut mol, c, [AtomId::VirtualH(c, 0), n(cl), n(o), n(me)]);
    run(&mut mol);
    assert_eq!(
        label(&mol, c),
        Some(CipDescriptor::new(CipLabel::R, Rule::R1a))
    );
}

#[test]
fn deuterium_decided_by_mass() {
    let mut mol = LabelledMol::new();
    let c = atom(&mut mol, 6, 1);
    let d = mol.add_atom(
        Atom {
            atomic_num: 1,
            isotope: 2,
            ..Atom::default()
        }
        .into(),
    );
    let me = atom(&mut mol, 6, 3);
    let o = atom(&mut mol, 8, 1);
    single(&mut mol, c, d);
    single(&mut mol, c, me);
    single(&mut mol, c, o);
    center(&mut mol, c, [AtomId::VirtualH(c, 0), n(o), n(me), n(d)]);
    run(&mut mol);
    assert_eq!(
        label(&mol, c),
        Some(CipDescriptor::new(CipLabel::R, Rule::R2))
    );
}

#[test]
fn sulfoxide_lone_pair_ranks_last() {
    let mut mol = LabelledMol::new();
    let s = atom(&mut mol, 16, 0);
    let o = atom(&mut mol, 8, 0);
    let me = atom(&mut mol, 6, 3);
    let ch2 = atom(&mut mol, 6, 2);
    let ch3 = atom(&mut mol, 6, 3);
    double(&mut mol, s, o);
    single(&mut mol, s, me);
    single(&mut mol, s, ch2);
    single(&mut mol, ch2, ch3);
    center(&mut mol, s, [AtomId::LonePair(s), n(o), n(ch2), n(me)]);
    let results = run(&mut mol);
    assert_eq!(
        results.atom(s),
        Some(CipDescriptor::new(CipLabel::R, Rule::R1a))
    );
}

/// X(H)(F) carrying CH=CH-CH3 branches with the given geometry.
fn propenyl_pair(first_cis: bool, second_cis: bool) -> (LabelledMol, NodeIndex, [EdgeIndex; 2]) {
    let mut mol = LabelledMol::new();
    let x = atom(&mut mol, 6, 1);
    let f = atom(&mut mol, 9, 0);
    single(&mut mol, x, f);
    let mut branches = Vec::new();
    let mut bonds = Vec::new();
    for cis in [first_cis, second_cis] {
        let c1 = atom(&mut mol, 6, 1);
        let c2 = atom(&mut mol, 6, 1);
        let c3 = atom(&mut mol, 6, 3);
        single(&mut mol, x, c1);
        bonds.push(double(&mut mol, c1, c2));
        single(&mut mol, c2, c3);
        let other = if cis { n(c3) } else { AtomId::VirtualH(c2, 0) };
        mol.add_ez_stereo(EZStereo::new(c1, c2, n(x), other));
        branches.push(c1);
    }
    center(
        &mut mol,
        x,
        [AtomId::VirtualH(x, 0), n(f), n(branches[0]), n(branches[1])],
    );
    (mol, x, [bonds[0], bonds[1]])
}

#[test]
fn rule_3_prefers_z_branch() {
    let (mut mol, x, bonds) = propenyl_pair(true, false);
    let results = run(&mut mol);
    assert_eq!(
        results.atom(x),
        Some(CipDescriptor::new(CipLabel::R, Rule::R3))
    );
    assert_eq!(results.bond(bonds[0]).map(|d| d.label), Some(CipLabel::Z));
    assert_eq!(results.bond(bonds[1]).map(|d| d.label), Some(CipLabel::E));
    assert_eq!(mol.bond(bonds[0]).cip_label().map(|d| d.label), Some(CipLabel::Z));

    let (mut mol, x, _) = propenyl_pair(false, true);
    run(&mut mol);
    assert_eq!(
        label(&mol, x),
        Some(CipDescriptor::new(CipLabel::S, Rule::R3))
    );
}

#[test]
fn identical_alkene_branches_leave_center_unlabelled() {
    let (mut mol, x, _) = propenyl_pair(true, true);
    let results = run(&mut mol);
    assert_eq!(results.atom(x), None);
    assert_eq!(label(&mol, x), None);
}

/// X(H)(F) carrying two CH(Cl)CH3 branches with the given handedness.
fn pseudo_center(first_r: bool, second_r: bool) -> (LabelledMol, NodeIndex, [NodeIndex; 2]) {
    let mut mol = LabelledMol::new();
    let x = atom(&mut mol, 6, 1);
    let f = atom(&mut mol, 9, 0);
    single(&mut mol, x, f);
    let mut branches = Vec::new();
    for r in [first_r, second_r] {
        let c = atom(&mut mol, 6, 1);
        let cl = atom(&mut mol, 17, 0);
        let me = atom(&mut mol, 6, 3);
        single(&mut mol, x, c);
        single(&mut mol, c, cl);
        single(&mut mol, c, me);
        // Cl > X > CH3 > H
        let above = if r {
            [AtomId::VirtualH(c, 0), n(cl), n(x), n(me)]
        } else {
            [AtomId::VirtualH(c, 0), n(x), n(cl), n(me)]
        };
        center(&mut mol, c, above);
        branches.push(c);
    }
    center(
        &mut mol,
        x,
        [AtomId::VirtualH(x, 0), n(f), n(branches[0]), n(branches[1])],
    );
    (mol, x, [branches[0], branches[1]])
}

#[test]
fn enantiomorphic_branches_give_pseudoasymmetry() {
    let (mut mol, x, [a, b]) = pseudo_center(true, false);
    let results = run(&mut mol);
    assert_eq!(
        results.atom(x),
        Some(CipDescriptor::new(CipLabel::PseudoR, Rule::R5))
    );
    assert_eq!(results.atom(a).map(|d| d.label), Some(CipLabel::R));
    assert_eq!(results.atom(b).map(|d| d.label), Some(CipLabel::S));

    let (mut mol, x, _) = pseudo_center(false, true);
    run(&mut mol);
    assert_eq!(label(&mol, x).map(|d| d.label), Some(CipLabel::PseudoS));
}

#[test]
fn homomorphic_branches_are_not_stereogenic() {
    let (mut mol, x, _) = pseudo_center(true, true);
    let results = run(&mut mol);
    assert_eq!(results.atom(x), None);
}

/// X(H)(F) with two CH(L)(L') branches, L = CH(Br)CH3. Each branch carries
/// one (R) and one (S) L, so the branch atoms are r/s. `first_r` picks which
/// branch is r.
fn self_enantiomorphic(first_r: bool) -> (LabelledMol, NodeIndex, [NodeIndex; 2]) {
    let mut mol = LabelledMol::new();
    let x = atom(&mut mol, 6, 1);
    let f = atom(&mut mol, 9, 0);
    single(&mut mol, x, f);
    let mut branches = Vec::new();
    for r in [first_r, !first_r] {
        let y = atom(&mut mol, 6, 1);
        single(&mut mol, x, y);
        let mut ls = Vec::new();
        for l_is_r in [true, false] {
            let l = atom(&mut mol, 6, 1);
            let br = atom(&mut mol, 35, 0);
            let me = atom(&mut mol, 6, 3);
            single(&mut mol, y, l);
            single(&mut mol, l, br);
            single(&mut mol, l, me);
            // Br > Y > CH3 > H
            let above = if l_is_r {
                [AtomId::VirtualH(l, 0), n(br), n(y), n(me)]
            } else {
                [AtomId::VirtualH(l, 0), n(y), n(br), n(me)]
            };
            center(&mut mol, l, above);
            ls.push(l);
        }
        // L(R) > L(S) > X > H
        let above = if r {
            [AtomId::VirtualH(y, 0), n(ls[0]), n(ls[1]), n(x)]
        } else {
            [AtomId::VirtualH(y, 0), n(ls[1]), n(ls[0]), n(x)]
        };
        center(&mut mol, y, above);
        branches.push(y);
    }
    center(
        &mut mol,
        x,
        [AtomId::VirtualH(x, 0), n(f), n(branches[0]), n(branches[1])],
    );
    (mol, x, [branches[0], branches[1]])
}

#[test]
fn r_and_s_branches_make_a_true_stereocenter() {
    let (mut mol, x, [a, b]) = self_enantiomorphic(true);
    let results = run(&mut mol);
    assert_eq!(
        results.atom(a),
        Some(CipDescriptor::new(CipLabel::PseudoR, Rule::R5))
    );
    assert_eq!(
        results.atom(b),
        Some(CipDescriptor::new(CipLabel::PseudoS, Rule::R5))
    );
    assert_eq!(
        results.atom(x),
        Some(CipDescriptor::new(CipLabel::R, Rule::R4c))
    );

    let (mut mol, x, _) = self_enantiomorphic(false);
    run(&mut mol);
    assert_eq!(label(&mol, x).map(|d| d.label), Some(CipLabel::S));
}

/// X(H)(F) with two CH(Cl)-CH(Br)-CH3 branches. The first branch is (R,R)
/// when `like`, otherwise (R,S); the second branch is the other pairing.
fn like_unlike(like_first: bool) -> (LabelledMol, NodeIndex) {
    let mut mol = LabelledMol::new();
    let x = atom(&mut mol, 6, 1);
    let f = atom(&mut mol, 9, 0);
    single(&mut mol, x, f);
    let mut branches = Vec::new();
    for like in [like_first, !like_first] {
        let c1 = atom(&mut mol, 6, 1);
        let cl = atom(&mut mol, 17, 0);
        let c2 = atom(&mut mol, 6, 1);
        let br = atom(&mut mol, 35, 0);
        let me = atom(&mut mol, 6, 3);
        single(&mut mol, x, c1);
        single(&mut mol, c1, cl);
        single(&mut mol, c1, c2);
        single(&mut mol, c2, br);
        single(&mut mol, c2, me);
        // c1: Cl > c2 > X > H, always R.
        center(&mut mol, c1, [AtomId::VirtualH(c1, 0), n(cl), n(c2), n(x)]);
        // c2: Br > c1 > CH3 > H, R when like.
        let above = if like {
            [AtomId::VirtualH(c2, 0), n(br), n(c1), n(me)]
        } else {
            [AtomId::VirtualH(c2, 0), n(br), n(me), n(c1)]
        };
        center(&mut mol, c2, above);
        branches.push(c1);
    }
    center(
        &mut mol,
        x,
        [AtomId::VirtualH(x, 0), n(f), n(branches[0]), n(branches[1])],
    );
    (mol, x)
}

#[test]
fn like_pair_precedes_unlike_pair() {
    let (mut mol, x) = like_unlike(true);
    let results = run(&mut mol);
    assert_eq!(
        results.atom(x),
        Some(CipDescriptor::new(CipLabel::R, Rule::R4b))
    );

    let (mut mol, x) = like_unlike(false);
    run(&mut mol);
    assert_eq!(
        label(&mol, x),
        Some(CipDescriptor::new(CipLabel::S, Rule::R4b))
    );
}

#[test]
fn root_only_perception_still_sees_branch_centers() {
    let (mol, x) = like_unlike(true);
    let perception = Perception {
        chiral_atoms: vec![x],
        ..Perception::default()
    };
    let results = compute_cip(&mol, &perception, &mol, &CipConfig::default());
    assert_eq!(
        results.atom(x),
        Some(CipDescriptor::new(CipLabel::R, Rule::R4b))
    );
    assert_eq!(results.atoms.len(), 1);
}

/// Spiro[4.4]nonane-1,6-dione. Returns the molecule, the spiro atom and
/// its ring neighbours [C1, C6, C4, C9].
fn spiro_dione() -> (LabelledMol, NodeIndex, [NodeIndex; 4]) {
    let mut mol = LabelledMol::new();
    let c5 = atom(&mut mol, 6, 0);
    let ring = |mol: &mut LabelledMol| {
        let carbonyl = atom(mol, 6, 0);
        let o = atom(mol, 8, 0);
        let a = atom(mol, 6, 2);
        let b = atom(mol, 6, 2);
        let last = atom(mol, 6, 2);
        double(mol, carbonyl, o);
        single(mol, c5, carbonyl);
        single(mol, carbonyl, a);
        single(mol, a, b);
        single(mol, b, last);
        single(mol, last, c5);
        (carbonyl, last)
    };
    let (c1, c4) = ring(&mut mol);
    let (c6, c9) = ring(&mut mol);
    (mol, c5, [c1, c6, c4, c9])
}

#[test]
fn spiro_center_resolved_by_rule_6() {
    let (mut mol, c5, [c1, c6, c4, c9]) = spiro_dione();
    center(&mut mol, c5, [n(c9), n(c1), n(c6), n(c4)]);
    let results = run(&mut mol);
    assert_eq!(
        results.atom(c5),
        Some(CipDescriptor::new(CipLabel::R, Rule::R6))
    );

    let (mut mol, c5, [c1, c6, c4, c9]) = spiro_dione();
    center(&mut mol, c5, [n(c9), n(c6), n(c1), n(c4)]);
    run(&mut mol);
    assert_eq!(
        label(&mol, c5),
        Some(CipDescriptor::new(CipLabel::S, Rule::R6))
    );
}

/// Ring of `size` carbons with a cis double bond between atoms 0 and 1.
fn cycloalkene(size: usize) -> (LabelledMol, EdgeIndex) {
    let mut mol = LabelledMol::new();
    let ring: Vec<NodeIndex> = (0..size)
        .map(|i| atom(&mut mol, 6, if i < 2 { 1 } else { 2 }))
        .collect();
    let db = double(&mut mol, ring[0], ring[1]);
    for i in 1..size {
        single(&mut mol, ring[i], ring[(i + 1) % size]);
    }
    mol.add_ez_stereo(EZStereo::new(
        ring[0],
        ring[1],
        n(ring[size - 1]),
        n(ring[2]),
    ));
    (mol, db)
}

#[test]
fn small_ring_double_bonds_get_no_descriptor() {
    let (mut mol, db) = cycloalkene(6);
    let results = run(&mut mol);
    assert_eq!(results.bond(db), None);

    let (mut mol, db) = cycloalkene(8);
    let results = run(&mut mol);
    assert_eq!(
        results.bond(db),
        Some(CipDescriptor::new(CipLabel::Z, Rule::R1a))
    );
}

#[test]
fn allene_and_butatriene_units() {
    // Cl-CH=C=CH-F: axial, labelled on the central atom.
    let mut mol = LabelledMol::new();
    let a = atom(&mut mol, 6, 1);
    let m = atom(&mut mol, 6, 0);
    let b = atom(&mut mol, 6, 1);
    let cl = atom(&mut mol, 17, 0);
    let f = atom(&mut mol, 9, 0);
    double(&mut mol, a, m);
    double(&mut mol, m, b);
    single(&mut mol, a, cl);
    single(&mut mol, b, f);
    mol.add_axial_stereo(AxialStereo::new(a, b, n(cl), n(f), Torsion::Positive));
    let results = run(&mut mol);
    assert_eq!(results.atom(m).map(|d| d.label), Some(CipLabel::P));
    assert!(results.bonds.is_empty());

    // Cl-CH=C=C=CH-F: planar, labelled on the central bond.
    let mut mol = LabelledMol::new();
    let a = atom(&mut mol, 6, 1);
    let m1 = atom(&mut mol, 6, 0);
    let m2 = atom(&mut mol, 6, 0);
    let b = atom(&mut mol, 6, 1);
    let cl = atom(&mut mol, 17, 0);
    let f = atom(&mut mol, 9, 0);
    double(&mut mol, a, m1);
    let central = double(&mut mol, m1, m2);
    double(&mut mol, m2, b);
    single(&mut mol, a, cl);
    single(&mut mol, b, f);
    mol.add_ez_stereo(EZStereo::new(a, b, n(cl), AtomId::VirtualH(b, 0)));
    let results = run(&mut mol);
    assert_eq!(results.bonds.len(), 1);
    assert_eq!(results.bond(central).map(|d| d.label), Some(CipLabel::E));
}

#[test]
fn helicene_overrides_are_reported_without_rule() {
    let (mol, c) = chloroethanol([0, 1, 2, 3]);
    let mut perception = Perception::from_mol(&mol);
    perception.helicene_m.insert(c);
    let results = compute_cip(&mol, &perception, &mol, &CipConfig::default());
    assert_eq!(
        results.atom(c),
        Some(CipDescriptor {
            label: CipLabel::M,
            rule: None
        })
    );
}

#[test]
fn repeated_runs_agree() {
    let (mol, _) = like_unlike(true);
    let perception = Perception::from_mol(&mol);
    let config = CipConfig::default();
    let first = compute_cip(&mol, &perception, &mol, &config);
    let second = compute_cip(&mol, &perception, &mol, &config);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn apply_clears_stale_labels() {
    let (mut mol, c) = chloroethanol([0, 1, 2, 3]);
    let stale = CipDescriptor::new(CipLabel::S, Rule::R1a);
    let cl = NodeIndex::new(1);
    mol.atom_mut(cl).set_cip_label(Some(stale));
    run(&mut mol);
    assert_eq!(label(&mol, cl), None);
    assert_eq!(label(&mol, c).map(|d| d.label), Some(CipLabel::R));
}
