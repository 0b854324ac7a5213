//! Method signature mapping
//!
//! Static table from the closed set of quest lifecycle/event method names
//! to Java signatures plus canned body prologues. Lookup is exact-string
//! and case-sensitive; there are no overloads and no arity checks. This is
//! configuration, not logic: on a recognized header the engine emits the
//! mapped signature and prologue verbatim (after class-name substitution)
//! and opens a block.

use std::collections::HashMap;

/// What kind of method a table entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// `__init__`: becomes the Java constructor.
    Constructor,
    /// Event handler, overriding a base `Quest` method.
    Handler(PrologueKind),
}

/// Canned prologue inserted at the start of a translated handler body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrologueKind {
    None,
    /// Fetch the per-player quest state, early-return null on absence.
    EventState,
    /// EventState plus a default fallback message, the npc id and the
    /// integer progress counter.
    TalkState,
}

const CONSTRUCTOR_PROLOGUE: &[&str] = &[
    "super(questId, name, descr);",
    "addState(CREATED);",
    "addState(STARTED);",
    "addState(COMPLETED);",
    "setInitialState(CREATED);",
];

const EVENT_STATE_PROLOGUE: &[&str] = &[
    "QuestState st = player.getQuestState(qn);",
    "if (st == null) return null;",
];

const TALK_STATE_PROLOGUE: &[&str] = &[
    "String htmltext = \"<html><body>You are either not on a quest that involves this NPC, or you don't meet this NPC's minimum quest requirements.</body></html>\";",
    "QuestState st = player.getQuestState(qn);",
    "if (st == null) return htmltext;",
    "int npcId = npc.getNpcId();",
    "int cond = st.getInt(\"cond\");",
    "State id = st.getState();",
];

/// One signature table entry.
#[derive(Debug, Clone)]
pub struct MethodSignature {
    /// Java signature, with a `{ClassName}` placeholder for the constructor.
    pub template: &'static str,
    pub kind: MethodKind,
}

impl MethodSignature {
    /// Substitute the class-name placeholder. Done once per conversion run.
    pub fn render(&self, class_name: &str) -> String {
        self.template.replace("{ClassName}", class_name)
    }

    /// Canned body lines for this entry, without indentation.
    pub fn prologue(&self) -> &'static [&'static str] {
        match self.kind {
            MethodKind::Constructor => CONSTRUCTOR_PROLOGUE,
            MethodKind::Handler(PrologueKind::EventState) => EVENT_STATE_PROLOGUE,
            MethodKind::Handler(PrologueKind::TalkState) => TALK_STATE_PROLOGUE,
            MethodKind::Handler(PrologueKind::None) => &[],
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, MethodKind::Constructor)
    }
}

/// Static name → signature table.
pub struct SignatureTable {
    map: HashMap<&'static str, MethodSignature>,
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureTable {
    pub fn new() -> Self {
        let mut map = HashMap::new();

        map.insert(
            "__init__",
            MethodSignature {
                template: "public {ClassName}(int questId, String name, String descr)",
                kind: MethodKind::Constructor,
            },
        );
        // onEvent maps onto the onAdvEvent signature but, matching the
        // historical converter's dispatch, gets no prologue.
        map.insert(
            "onEvent",
            MethodSignature {
                template: "public String onAdvEvent(String event, L2Npc npc, L2PcInstance player)",
                kind: MethodKind::Handler(PrologueKind::None),
            },
        );
        map.insert(
            "onAdvEvent",
            MethodSignature {
                template: "public String onAdvEvent(String event, L2Npc npc, L2PcInstance player)",
                kind: MethodKind::Handler(PrologueKind::EventState),
            },
        );
        map.insert(
            "onTalk",
            MethodSignature {
                template: "public String onTalk(L2Npc npc, L2PcInstance player)",
                kind: MethodKind::Handler(PrologueKind::TalkState),
            },
        );
        map.insert(
            "onFirstTalk",
            MethodSignature {
                template: "public String onFirstTalk(L2Npc npc, L2PcInstance player)",
                kind: MethodKind::Handler(PrologueKind::None),
            },
        );
        map.insert(
            "onAttack",
            MethodSignature {
                template:
                    "public String onAttack(L2Npc npc, L2PcInstance attacker, int damage, boolean isPet)",
                kind: MethodKind::Handler(PrologueKind::None),
            },
        );
        map.insert(
            "onKill",
            MethodSignature {
                template: "public String onKill(L2Npc npc, L2PcInstance killer, boolean isPet)",
                kind: MethodKind::Handler(PrologueKind::None),
            },
        );
        map.insert(
            "onSpawn",
            MethodSignature {
                template: "public String onSpawn(L2Npc npc)",
                kind: MethodKind::Handler(PrologueKind::None),
            },
        );
        map.insert(
            "onSkillSee",
            MethodSignature {
                template:
                    "public String onSkillSee(L2Npc npc, L2PcInstance caster, L2Skill skill, L2Object[] targets, boolean isPet)",
                kind: MethodKind::Handler(PrologueKind::None),
            },
        );
        map.insert(
            "onAggroRangeEnter",
            MethodSignature {
                template:
                    "public String onAggroRangeEnter(L2Npc npc, L2PcInstance player, boolean isPet)",
                kind: MethodKind::Handler(PrologueKind::None),
            },
        );

        Self { map }
    }

    /// Exact-match lookup; no normalization, no partial matching.
    pub fn get(&self, name: &str) -> Option<&MethodSignature> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// All recognized method names.
    pub fn method_names(&self) -> Vec<&'static str> {
        self.map.keys().copied().collect()
    }
}
