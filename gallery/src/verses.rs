//! Static verse content and per-scene presets
//!
//! Pure configuration: verse text, two explanatory paragraphs, a scene
//! kind tag, and the numeric knobs each recipe reads. Loaded once,
//! immutable.

use common::palette;

/// Which recipe a verse's scene is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    DoubleSlit,
    Collapse,
    Entanglement,
    Decoherence,
    SymmetryBreak,
    Superposition,
}

impl SceneKind {
    pub fn label(&self) -> &'static str {
        match self {
            SceneKind::DoubleSlit => "double slit",
            SceneKind::Collapse => "wavefunction collapse",
            SceneKind::Entanglement => "entanglement",
            SceneKind::Decoherence => "decoherence",
            SceneKind::SymmetryBreak => "symmetry breaking",
            SceneKind::Superposition => "superposition",
        }
    }
}

/// Numeric knobs for a scene. Interpreted per recipe.
#[derive(Debug, Clone, Copy)]
pub struct ScenePreset {
    pub particles: usize,
    pub speed: f32,
    pub radius: f32,
    pub primary: [f32; 4],
    pub secondary: [f32; 4],
}

/// One verse paired with its visual metaphor.
#[derive(Debug)]
pub struct VerseRecord {
    pub chapter: u32,
    pub number: u32,
    pub title: &'static str,
    pub text: &'static str,
    pub quantum_note: &'static str,
    pub madhyamaka_note: &'static str,
    pub kind: SceneKind,
    pub preset: ScenePreset,
    /// Flat scenes use the orthographic camera
    pub flat: bool,
}

pub const VERSES: &[VerseRecord] = &[
    VerseRecord {
        chapter: 1,
        number: 1,
        title: "Conditions",
        text: "Neither from itself nor from another, nor from both, \
               nor without a cause, does anything anywhere ever arise.",
        quantum_note: "Until it is registered, a particle passing the two \
               slits has no single path of its own. The fringes on the \
               screen arise from the whole arrangement, not from a \
               trajectory the particle carried with it.",
        madhyamaka_note: "Nāgārjuna opens by denying that things arise from \
               an intrinsic essence. What appears does so dependent on \
               conditions, like fringes dependent on both slits at once.",
        kind: SceneKind::DoubleSlit,
        preset: ScenePreset {
            particles: 60,
            speed: 4.0,
            radius: 8.0,
            primary: palette::CYAN,
            secondary: palette::AMBER,
        },
        flat: true,
    },
    VerseRecord {
        chapter: 1,
        number: 3,
        title: "No Essence in Conditions",
        text: "The essence of things does not exist in their conditions; \
               and if there is no own-essence, there is no other-essence.",
        quantum_note: "A superposed state holds every outcome as amplitude, \
               none as fact. The breathing cloud is not hiding a definite \
               position; there is none to hide.",
        madhyamaka_note: "Searching the conditions for a thing's essence \
               finds nothing that was ever there to find.",
        kind: SceneKind::Superposition,
        preset: ScenePreset {
            particles: 220,
            speed: 0.8,
            radius: 3.0,
            primary: palette::VIOLET,
            secondary: palette::CYAN,
        },
        flat: false,
    },
    VerseRecord {
        chapter: 2,
        number: 1,
        title: "The Moved and the Unmoved",
        text: "What has been moved is not moving; what has not been moved \
               is not moving; apart from these, no present moving is known.",
        quantum_note: "Between preparation and detection there is no fact of \
               the matter about where the system passed. Motion dissolves \
               into amplitudes the same way the verse dissolves it into \
               tenses.",
        madhyamaka_note: "Motion examined closely is nowhere locatable, yet \
               things arrive. The analysis removes the essence, not the \
               function.",
        kind: SceneKind::Superposition,
        preset: ScenePreset {
            particles: 160,
            speed: 1.6,
            radius: 4.0,
            primary: palette::JADE,
            secondary: palette::MIST,
        },
        flat: false,
    },
    VerseRecord {
        chapter: 7,
        number: 16,
        title: "Pacified of Essence",
        text: "Whatever exists dependently is pacified of intrinsic nature; \
               therefore both what is arising and arising itself are \
               pacified.",
        quantum_note: "An observation collapses the cloud of possibilities \
               to a single registered outcome. The act is irreversible: a \
               second look finds only what the first one fixed.",
        madhyamaka_note: "Fixing a thing in analysis stops its play of \
               conditions. What was fluid under dependence becomes inert \
               the moment it is grasped as a fact.",
        kind: SceneKind::Collapse,
        preset: ScenePreset {
            particles: 260,
            speed: 1.1,
            radius: 3.4,
            primary: palette::CYAN,
            secondary: palette::ROSE,
        },
        flat: false,
    },
    VerseRecord {
        chapter: 13,
        number: 3,
        title: "Things Alter",
        text: "Things alter, for we observe their changing; there is no \
               alteration of what has essence of its own.",
        quantum_note: "Coupling a pure state to an environment leaks its \
               phase relations away. Coherence decays smoothly; nothing \
               intrinsic is destroyed because nothing intrinsic was there.",
        madhyamaka_note: "Change is only possible for what lacks fixed \
               nature. An essence could never alter; alteration proves its \
               absence.",
        kind: SceneKind::Decoherence,
        preset: ScenePreset {
            particles: 48,
            speed: 2.2,
            radius: 4.2,
            primary: palette::CYAN,
            secondary: palette::ROSE,
        },
        flat: false,
    },
    VerseRecord {
        chapter: 14,
        number: 1,
        title: "Connection",
        text: "The seen, the seeing, and the seer: these three do not \
               connect pairwise, nor all together.",
        quantum_note: "Two entangled particles hold one shared state between \
               them. Measure either and both answers are fixed at once; the \
               correlation belongs to the pair, not to the parts.",
        madhyamaka_note: "Relation is not a third thing welding two others \
               together. The relata and the relation arise together or not \
               at all.",
        kind: SceneKind::Entanglement,
        preset: ScenePreset {
            particles: 2,
            speed: 0.9,
            radius: 3.0,
            primary: palette::AMBER,
            secondary: palette::CYAN,
        },
        flat: false,
    },
    VerseRecord {
        chapter: 15,
        number: 2,
        title: "Essence and Fabrication",
        text: "How could essence be made? Essence is not fabricated and \
               does not depend on another.",
        quantum_note: "A perfectly symmetric state cannot stay on its ridge; \
               the slightest perturbation tips it into one of the equal \
               wells. The chosen side is history, not essence.",
        madhyamaka_note: "What something 'really is' turns out to be one \
               more contingent settling among alternatives that were never \
               distinguished in advance.",
        kind: SceneKind::SymmetryBreak,
        preset: ScenePreset {
            particles: 90,
            speed: 1.4,
            radius: 3.6,
            primary: palette::MIST,
            secondary: palette::AMBER,
        },
        flat: false,
    },
    VerseRecord {
        chapter: 21,
        number: 15,
        title: "Arising and Dissolution",
        text: "Dissolution is not without arising, nor together with it; \
               arising is not without dissolution, nor together with it.",
        quantum_note: "A system never decoheres alone: its order leaks into \
               the environment exactly as the environment's noise leaks in. \
               The two processes are one coupling seen from two sides.",
        madhyamaka_note: "Coming-to-be and ceasing are not two events that \
               could be separated and stacked; each is intelligible only \
               through the other.",
        kind: SceneKind::Decoherence,
        preset: ScenePreset {
            particles: 64,
            speed: 3.0,
            radius: 5.0,
            primary: palette::VIOLET,
            secondary: palette::AMBER,
        },
        flat: false,
    },
    VerseRecord {
        chapter: 24,
        number: 18,
        title: "Dependent Arising Is Emptiness",
        text: "Whatever is dependently co-arisen, that is explained to be \
               emptiness; being a dependent designation, it is itself the \
               middle way.",
        quantum_note: "Run the experiment again with the detectors off and \
               the fringes return. Which picture is 'really there' depends \
               on the whole arrangement, and neither picture is final.",
        madhyamaka_note: "Emptiness is not a void behind appearances but the \
               dependence of appearances themselves; the famous verse states \
               the equivalence outright.",
        kind: SceneKind::DoubleSlit,
        preset: ScenePreset {
            particles: 90,
            speed: 5.5,
            radius: 8.0,
            primary: palette::VIOLET,
            secondary: palette::JADE,
        },
        flat: true,
    },
    VerseRecord {
        chapter: 25,
        number: 3,
        title: "Unceasing, Unarisen",
        text: "Unrelinquished, unattained, unannihilated, not permanent, \
               unarisen, unceased: this is how nirvāṇa is taught.",
        quantum_note: "The undisturbed state simply persists, neither \
               gaining nor losing anything, its phases turning without any \
               event to mark.",
        madhyamaka_note: "The chapter's refusals pile up until nothing is \
               left to grasp, and that absence of grasping is the point.",
        kind: SceneKind::Superposition,
        preset: ScenePreset {
            particles: 300,
            speed: 0.4,
            radius: 2.6,
            primary: palette::MIST,
            secondary: palette::VIOLET,
        },
        flat: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_nonempty_and_varied() {
        assert!(VERSES.len() >= 10);
        assert!(VERSES.iter().any(|v| v.kind == SceneKind::DoubleSlit));
        assert!(VERSES.iter().any(|v| v.kind == SceneKind::Collapse));
        assert!(VERSES.iter().any(|v| v.kind == SceneKind::Entanglement));
    }

    #[test]
    fn verse_sixteen_is_the_collapse_scene() {
        let v = VERSES.iter().find(|v| v.number == 16).unwrap();
        assert_eq!(v.kind, SceneKind::Collapse);
    }

    #[test]
    fn only_double_slit_scenes_are_flat() {
        for v in VERSES {
            assert_eq!(v.flat, v.kind == SceneKind::DoubleSlit, "{}", v.title);
        }
    }
}
