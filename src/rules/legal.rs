//! Legal-action enumeration.
//!
//! Legality is decided per candidate card or slot:
//!
//! | Source            | Targets                                            |
//! |-------------------|----------------------------------------------------|
//! | basic card        | empty slots                                        |
//! | evolution card    | slots whose unit is named like the card's base     |
//! | energy card       | occupied slots                                     |
//! | unit: wake up     | only command of a sleeping unit                    |
//! | unit: shift       | empty slots, not two turns running                 |
//! | unit: retreat     | empty slots, or units with retreat cost <= own     |
//! | unit: move        | affordable moves with a unit in the facing slot    |
//!
//! Paralyzed units have no commands.

use smallvec::SmallVec;

use crate::cards::{Affliction, Card, EnergyMap, Placement, Unit};
use crate::choice::Candidate;
use crate::core::{Action, BattleState, PlayerId, RulesConfig, FRONT_LINE_SLOTS};
use crate::zones::{FrontLine, PlayerBoard, Slots};

/// Something a unit on the front line can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitCommand {
    WakeUp,
    Shift,
    Retreat,
    UseMove(usize),
}

impl From<UnitCommand> for Candidate {
    fn from(command: UnitCommand) -> Self {
        match command {
            UnitCommand::WakeUp => Candidate::WakeUp,
            UnitCommand::Shift => Candidate::Shift,
            UnitCommand::Retreat => Candidate::Retreat,
            UnitCommand::UseMove(index) => Candidate::UseMove(index),
        }
    }
}

pub type Commands = SmallVec<[UnitCommand; 6]>;

/// Slots a hand card may be played onto.
#[must_use]
pub fn placement_targets(card: &Card, line: &FrontLine) -> Slots {
    match card.placement() {
        Placement::Basic => line.empty_slots(),
        Placement::Evolved { from } => line
            .units()
            .filter(|(_, unit)| unit.name() == from)
            .map(|(slot, _)| slot)
            .collect(),
        Placement::Energy(_) => line.occupied_slots(),
    }
}

/// Can this unit shift into an empty slot?
#[must_use]
pub fn can_shift(unit: &Unit) -> bool {
    !unit.moved_last_turn()
}

/// Empty slots the unit in `slot` may shift into.
#[must_use]
pub fn shift_targets(line: &FrontLine, slot: usize) -> Slots {
    match line.get(slot) {
        Some(unit) if can_shift(unit) => line.empty_slots(),
        _ => Slots::new(),
    }
}

/// Slots the unit in `slot` may retreat to, if it can pay its retreat cost.
#[must_use]
pub fn retreat_targets(line: &FrontLine, slot: usize) -> Slots {
    let Some(unit) = line.get(slot) else {
        return Slots::new();
    };
    if !unit.sufficient_energy(&EnergyMap::colorless(unit.retreat_cost())) {
        return Slots::new();
    }
    (0..FRONT_LINE_SLOTS)
        .filter(|s| *s != slot)
        .filter(|s| line.get(*s).map_or(true, |other| other.retreat_cost() <= unit.retreat_cost()))
        .collect()
}

/// Moves the unit in `slot` can use right now.
#[must_use]
pub fn usable_moves(own: &FrontLine, opponent: &FrontLine, slot: usize) -> SmallVec<[usize; 4]> {
    let Some(unit) = own.get(slot) else {
        return SmallVec::new();
    };
    if !opponent.is_occupied(FrontLine::opposing(slot)) {
        return SmallVec::new();
    }
    (0..unit.moves().len()).filter(|i| unit.can_use_move(*i)).collect()
}

/// Commands available to the unit in `slot`.
#[must_use]
pub fn unit_commands(own: &FrontLine, opponent: &FrontLine, slot: usize) -> Commands {
    let mut commands = Commands::new();
    let Some(unit) = own.get(slot) else {
        return commands;
    };

    match unit.affliction() {
        Some(Affliction::Asleep) => {
            commands.push(UnitCommand::WakeUp);
            return commands;
        }
        Some(Affliction::Paralyzed) => return commands,
        _ => {}
    }

    if !shift_targets(own, slot).is_empty() {
        commands.push(UnitCommand::Shift);
    }
    if !retreat_targets(own, slot).is_empty() {
        commands.push(UnitCommand::Retreat);
    }
    commands.extend(usable_moves(own, opponent, slot).into_iter().map(UnitCommand::UseMove));
    commands
}

/// Is drawing a card a legal action?
///
/// With an empty deck, drawing is only offered when it ends the battle.
#[must_use]
pub fn can_draw(board: &PlayerBoard, config: &RulesConfig) -> bool {
    !board.deck.is_empty() || config.deck_out_loses
}

/// Every fully-specified legal action for `player`.
#[must_use]
pub fn legal_actions(state: &BattleState, player: PlayerId, config: &RulesConfig) -> Vec<Action> {
    let mut actions = Vec::new();
    if state.is_over() {
        return actions;
    }

    let own = state.board(player);
    let opponent = &state.board(player.opponent()).front_line;

    for (hand_index, card) in own.hand.iter().enumerate() {
        for slot in placement_targets(card, &own.front_line) {
            actions.push(match card.placement() {
                Placement::Basic => Action::PlaceBasic { hand_index, slot },
                Placement::Evolved { .. } => Action::Evolve { hand_index, slot },
                Placement::Energy(_) => Action::AttachEnergy { hand_index, slot },
            });
        }
    }

    for slot in own.front_line.occupied_slots() {
        for command in unit_commands(&own.front_line, opponent, slot) {
            match command {
                UnitCommand::WakeUp => actions.push(Action::WakeUp { slot }),
                UnitCommand::Shift => actions.extend(
                    shift_targets(&own.front_line, slot)
                        .into_iter()
                        .map(|to| Action::Shift { slot, to }),
                ),
                UnitCommand::Retreat => actions.extend(
                    retreat_targets(&own.front_line, slot)
                        .into_iter()
                        .map(|to| Action::Retreat { slot, to }),
                ),
                UnitCommand::UseMove(move_index) => actions.push(Action::UseMove { slot, move_index }),
            }
        }
    }

    if can_draw(own, config) {
        actions.push(Action::Draw);
    }
    actions
}
