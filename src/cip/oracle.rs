use petgraph::graph::NodeIndex;

use crate::mol::{permutation_parity, AtomId, Mol, Torsion};

/// Sense of rotation from the first to the third ranked ligand, viewed with
/// the lowest-ranked ligand pointing away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondSide {
    Cis,
    Trans,
}

/// Geometric handedness queries. The CIP engine only ever ranks ligands;
/// turning a ranking into a sense of rotation is delegated here.
///
/// Every method returns `None` when the geometry is unknown, which leaves
/// the center or bond without a descriptor.
pub trait StereoOracle {
    /// `ligands` ranked from highest to lowest priority.
    fn tetrahedral(&self, center: NodeIndex, ligands: [AtomId; 4]) -> Option<Handedness>;

    /// Relative position of `refs[0]` (on `ends.0`) and `refs[1]` (on
    /// `ends.1`) across a double bond or even cumulene.
    fn planar(&self, ends: (NodeIndex, NodeIndex), refs: [AtomId; 2]) -> Option<BondSide>;

    /// Sign of the torsion `refs[0]`–`ends.0`–`ends.1`–`refs[1]` along an
    /// allene, odd cumulene or hindered biaryl axis.
    fn axial(&self, ends: (NodeIndex, NodeIndex), refs: [AtomId; 2]) -> Option<Torsion>;
}

/// Answers from the stereo annotations stored on the molecule.
impl<A, B> StereoOracle for Mol<A, B> {
    fn tetrahedral(&self, center: NodeIndex, ligands: [AtomId; 4]) -> Option<Handedness> {
        let stereo = self.tetrahedral_stereo_for(center)?;
        if !ligands.iter().all(|l| stereo.above.contains(l)) {
            return None;
        }
        // `above` lists the first ligand and then the other three
        // counter-clockwise. Seen from the side opposite the lowest-ranked
        // ligand that order reads clockwise when it is an even permutation
        // of [lowest, first, second, third].
        let target = [ligands[3], ligands[0], ligands[1], ligands[2]];
        Some(if permutation_parity(&stereo.above, &target) {
            Handedness::Clockwise
        } else {
            Handedness::CounterClockwise
        })
    }

    fn planar(&self, ends: (NodeIndex, NodeIndex), refs: [AtomId; 2]) -> Option<BondSide> {
        let stereo = self.ez_stereo_for(ends.0, ends.1)?;
        let same = stored_refs_match(stereo.bond, stereo.refs, ends, refs);
        Some(if same { BondSide::Cis } else { BondSide::Trans })
    }

    fn axial(&self, ends: (NodeIndex, NodeIndex), refs: [AtomId; 2]) -> Option<Torsion> {
        let stereo = self.axial_stereo_for(ends.0, ends.1)?;
        let same = stored_refs_match(stereo.axis, stereo.refs, ends, refs);
        Some(if same {
            stereo.torsion
        } else {
            stereo.torsion.flipped()
        })
    }
}

/// `true` when the queried references sit on the same sides as the stored
/// ones, or have both been swapped for the other ligand on their end.
fn stored_refs_match(
    stored_ends: (NodeIndex, NodeIndex),
    stored: [AtomId; 2],
    ends: (NodeIndex, NodeIndex),
    refs: [AtomId; 2],
) -> bool {
    let aligned = if ends.0 == stored_ends.0 {
        refs
    } else {
        [refs[1], refs[0]]
    };
    (stored[0] == aligned[0]) == (stored[1] == aligned[1])
}
