use std::collections::HashMap;

use automata::Afa;
use automata::Node;
use automata::Nodes;
use automata::State;
use automata::Symbol;
use log::trace;

use crate::Alphabet;
use crate::ParsedSection;
use crate::SectionError;

/// The section type tag of an alternating finite automaton.
pub const TYPE_AFA: &str = "AFA";

/// The dictionary keys carrying the initial and final state name lists.
const KEY_INITIAL: &str = "Initial";
const KEY_FINAL: &str = "Final";

/// Constructs an alternating automaton from a parsed section.
///
/// The `Initial` and `Final` dictionary entries list state names; every body
/// line carries one transition in disjunctive normal form,
///
/// ```text
/// src symbol state… ( | state… )*
/// ```
///
/// where each `|`-separated clause is one conjunctive node. State names are
/// mapped through `state_map` and symbol names through `alphabet`, assigning
/// identifiers in first-seen order; when either is absent a fresh on-the-fly
/// one is used and dropped afterwards. Both the forward and the inverse
/// transition relation of the automaton are populated.
pub fn construct_afa(
    section: &ParsedSection,
    alphabet: Option<&mut Alphabet>,
    state_map: Option<&mut HashMap<String, State>>,
) -> Result<Afa, SectionError> {
    if section.section_type != TYPE_AFA {
        return Err(SectionError::WrongType {
            expected: TYPE_AFA,
            found: section.section_type.clone(),
        });
    }

    let mut owned_alphabet = Alphabet::on_the_fly();
    let alphabet = alphabet.unwrap_or(&mut owned_alphabet);

    let mut owned_map = HashMap::new();
    let state_map = state_map.unwrap_or(&mut owned_map);

    // Discover every state name first so that the automaton can be created
    // with its full state count. Identifiers continue after the largest one
    // already present in a caller-provided map.
    let mut next_state = state_map
        .values()
        .max()
        .map_or(0, |&largest| largest + 1);
    let mut get_state = |state_map: &mut HashMap<String, State>, name: &str| {
        if let Some(&state) = state_map.get(name) {
            return state;
        }

        let state = next_state;
        state_map.insert(name.to_string(), state);
        next_state += 1;
        state
    };

    for key in [KEY_INITIAL, KEY_FINAL] {
        if let Some(names) = section.dict.get(key) {
            for name in names {
                get_state(state_map, name);
            }
        }
    }

    for line in &section.body {
        if line.len() < 2 {
            return Err(SectionError::InvalidTransitionLine(line.join(" ")));
        }

        get_state(state_map, &line[0]);
        for token in &line[2..] {
            if token != "|" {
                get_state(state_map, token);
            }
        }
    }

    let mut afa = Afa::with_states(next_state);

    if let Some(names) = section.dict.get(KEY_INITIAL) {
        for name in names {
            afa.add_initial(state_map[name]);
        }
    }

    if let Some(names) = section.dict.get(KEY_FINAL) {
        for name in names {
            afa.add_final(state_map[name]);
        }
    }

    for line in &section.body {
        let src = state_map[&line[0]];
        let symbol = alphabet.translate_symbol(&line[1])?;

        let mut destinations = Nodes::new();
        let mut clause = Node::new();
        for token in &line[2..] {
            if token == "|" {
                if clause.is_empty() {
                    return Err(SectionError::InvalidTransitionLine(line.join(" ")));
                }
                destinations.insert(std::mem::take(&mut clause));
            } else {
                clause.insert(state_map[token]);
            }
        }

        if clause.is_empty() {
            return Err(SectionError::InvalidTransitionLine(line.join(" ")));
        }
        destinations.insert(clause);

        trace!("Read transition {src} --[{symbol}]-> {destinations:?}");

        afa.add_trans(src, symbol, destinations.clone());
        afa.add_inverse_trans(src, symbol, &destinations);
    }

    Ok(afa)
}

/// Serializes an alternating automaton into a parsed section in the format
/// accepted by [construct_afa].
///
/// Without an alphabet or state name map the positional namers `a{symbol}`
/// and `q{state}` are used; with one, a state or symbol that has no name is
/// a translation error.
pub fn serialize_afa(
    aut: &Afa,
    alphabet: Option<&Alphabet>,
    state_names: Option<&HashMap<State, String>>,
) -> Result<ParsedSection, SectionError> {
    let name_state = |state: State| -> Result<String, SectionError> {
        match state_names {
            None => Ok(format!("q{state}")),
            Some(map) => map.get(&state).cloned().ok_or(SectionError::Translation {
                kind: "state",
                identifier: state.to_string(),
            }),
        }
    };

    let name_symbol = |symbol: Symbol| -> Result<String, SectionError> {
        match alphabet {
            None => Ok(format!("a{symbol}")),
            Some(alphabet) => alphabet
                .symbol_name(symbol)
                .map(str::to_string)
                .ok_or(SectionError::Translation {
                    kind: "symbol",
                    identifier: symbol.to_string(),
                }),
        }
    };

    let mut section = ParsedSection {
        section_type: TYPE_AFA.to_string(),
        ..Default::default()
    };

    let mut initial = Vec::new();
    for &state in aut.initial_states() {
        initial.push(name_state(state)?);
    }
    section.dict.insert(KEY_INITIAL.to_string(), initial);

    let mut finals = Vec::new();
    for &state in aut.final_states() {
        finals.push(name_state(state)?);
    }
    section.dict.insert(KEY_FINAL.to_string(), finals);

    for src in 0..aut.num_of_states() {
        for entry in aut.moves(src) {
            let mut line = vec![name_state(src)?, name_symbol(entry.symbol)?];

            for (index, node) in entry.destinations.iter().enumerate() {
                debug_assert!(!node.is_empty(), "Destination nodes are never empty.");

                if index > 0 {
                    line.push("|".to_string());
                }
                for &state in node {
                    line.push(name_state(state)?);
                }
            }

            section.body.push(line);
        }
    }

    Ok(section)
}

#[cfg(test)]
mod tests {
    use automata::forward_emptiness_closure;
    use test_log::test;

    use super::*;
    use crate::read_section;

    fn section(input: &str) -> ParsedSection {
        read_section(input.as_bytes()).unwrap()
    }

    #[test]
    fn test_construct_afa() {
        let section = section(
            "\
@AFA
%Initial q0
%Final q2
q0 a q1 q2 | q2
q1 b q2
",
        );

        let mut alphabet = Alphabet::on_the_fly();
        let mut state_map = HashMap::new();
        let afa = construct_afa(&section, Some(&mut alphabet), Some(&mut state_map)).unwrap();

        assert_eq!(afa.num_of_states(), 3);
        assert_eq!(state_map["q0"], 0);
        assert_eq!(state_map["q2"], 1);
        assert_eq!(state_map["q1"], 2);

        assert!(afa.has_initial(state_map["q0"]));
        assert!(afa.has_final(state_map["q2"]));

        let destinations = afa.perform_trans(state_map["q0"], 0).unwrap();
        assert_eq!(destinations.len(), 2);
        assert!(destinations.contains(&Node::singleton(state_map["q2"])));
        assert!(destinations
            .contains(&Node::from_vec(vec![state_map["q1"], state_map["q2"]])));

        // The inverse relation is populated alongside the forward relation.
        let results = afa
            .perform_inverse_trans(state_map["q2"], 0)
            .unwrap();
        assert!(!results.is_empty());

        // The word "a" is accepted, so the language is not empty.
        assert!(!forward_emptiness_closure(&afa).unwrap());
    }

    #[test]
    fn test_construct_rejects_wrong_type() {
        let section = section("@NFA\n");

        let mut alphabet = Alphabet::on_the_fly();
        assert_eq!(
            construct_afa(&section, Some(&mut alphabet), None),
            Err(SectionError::WrongType {
                expected: "AFA",
                found: "NFA".to_string(),
            })
        );
    }

    #[test]
    fn test_construct_rejects_short_transition_line() {
        let section = section("@AFA\nq0\n");

        let mut alphabet = Alphabet::on_the_fly();
        assert_eq!(
            construct_afa(&section, Some(&mut alphabet), None),
            Err(SectionError::InvalidTransitionLine("q0".to_string()))
        );
    }

    #[test]
    fn test_construct_rejects_empty_clause() {
        let section = section("@AFA\nq0 a q1 |\n");

        let mut alphabet = Alphabet::on_the_fly();
        assert_eq!(
            construct_afa(&section, Some(&mut alphabet), None),
            Err(SectionError::InvalidTransitionLine(
                "q0 a q1 |".to_string()
            ))
        );
    }

    #[test]
    fn test_construct_with_fixed_alphabet_rejects_unknown_symbol() {
        let section = section("@AFA\nq0 a q1\n");

        let mut alphabet = Alphabet::fixed(HashMap::new());
        assert_eq!(
            construct_afa(&section, Some(&mut alphabet), None),
            Err(SectionError::Translation {
                kind: "symbol",
                identifier: "a".to_string(),
            })
        );
    }

    #[test]
    fn test_serialize_uses_positional_namers() {
        let mut afa = Afa::with_states(2);
        afa.add_initial(0);
        afa.add_final(1);
        let destinations = Nodes::singleton(Node::singleton(1));
        afa.add_trans(0, 3, destinations.clone());
        afa.add_inverse_trans(0, 3, &destinations);

        let section = serialize_afa(&afa, None, None).unwrap();

        assert_eq!(section.section_type, "AFA");
        assert_eq!(section.dict["Initial"], vec!["q0"]);
        assert_eq!(section.dict["Final"], vec!["q1"]);
        assert_eq!(section.body, vec![vec!["q0", "a3", "q1"]]);
    }

    #[test]
    fn test_serialize_fails_on_nameless_state() {
        let mut afa = Afa::with_states(2);
        afa.add_initial(0);
        afa.add_initial(1);

        let mut state_names = HashMap::new();
        state_names.insert(0, "q0".to_string());

        assert_eq!(
            serialize_afa(&afa, None, Some(&state_names)),
            Err(SectionError::Translation {
                kind: "state",
                identifier: "1".to_string(),
            })
        );
    }

    #[test]
    fn test_round_trip_preserves_the_automaton() {
        let input = "\
@AFA
%Initial q0
%Final q3
q0 a q1 q2 | q3
q1 b q3
q2 b q3
";

        let mut alphabet = Alphabet::on_the_fly();
        let mut state_map = HashMap::new();
        let afa = construct_afa(&section(input), Some(&mut alphabet), Some(&mut state_map)).unwrap();

        let state_names: HashMap<State, String> = state_map
            .iter()
            .map(|(name, &state)| (state, name.clone()))
            .collect();
        let serialized = serialize_afa(&afa, Some(&alphabet), Some(&state_names)).unwrap();

        let mut alphabet_again = Alphabet::on_the_fly();
        let mut state_map_again = state_map.clone();
        let rebuilt = construct_afa(
            &serialized,
            Some(&mut alphabet_again),
            Some(&mut state_map_again),
        )
        .unwrap();

        assert_eq!(afa, rebuilt);
    }
}
