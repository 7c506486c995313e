use crate::game::agent::PlayContext;
use crate::game::events::HandEvent;
use crate::game::round::{HandDriver, HandError};
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::legality::{IllegalPlay, check_play};
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use tracing::{Level, event};

/// Collects one card from each seat, starting with `leader`.
pub(crate) fn play_trick(
    hands: &mut [Hand; 4],
    trump: Suit,
    leader: Seat,
    number: usize,
    dealer: Seat,
    driver: &mut HandDriver<'_>,
) -> Result<Trick, HandError> {
    let mut trick = Trick::new(leader, trump);
    for seat in leader.rotation() {
        let card = solicit(&hands[seat.index()], &trick, seat, number, dealer, driver)?;
        hands[seat.index()].remove(card);
        trick.play(seat, card)?;
        event!(
            target: "allfours_core::trick",
            Level::TRACE,
            number,
            seat = ?seat,
            card = %card,
            "card played"
        );
        driver.emit(HandEvent::CardPlayed { seat, card });
    }
    Ok(trick)
}

/// Asks `seat` for cards until one is legal.
fn solicit(
    hand: &Hand,
    trick: &Trick,
    seat: Seat,
    number: usize,
    dealer: Seat,
    driver: &mut HandDriver<'_>,
) -> Result<Card, HandError> {
    loop {
        let ctx = PlayContext {
            seat,
            dealer,
            hand,
            trick,
            trick_number: number,
            scores: &*driver.scores,
        };
        let Some(card) = driver.agents[seat.index()].choose_card(&ctx) else {
            return Err(HandError::AgentExhausted { seat });
        };

        let verdict = if hand.contains(card) {
            check_play(card, trick.lead_suit(), trick.trump(), hand, &trick.cards())
        } else {
            Err(IllegalPlay::CardNotInHand { card })
        };
        match verdict {
            Ok(()) => return Ok(card),
            Err(reason) => {
                event!(
                    target: "allfours_core::trick",
                    Level::DEBUG,
                    seat = ?seat,
                    card = %card,
                    %reason,
                    "play rejected"
                );
                driver.agents[seat.index()].play_rejected(card, reason);
                driver.emit(HandEvent::PlayRejected { seat, card, reason });
            }
        }
    }
}
