use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    #[error("need {needed} cards but only {remaining} remain in the shoe")]
    InsufficientCards { needed: usize, remaining: usize },
    #[error("no card left to kick")]
    EmptyShoe,
}

/// Undealt cards for one hand. Cards only ever leave from the front.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// A shoe whose front card is `cards[0]`.
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut shoe = Self::standard();
        shoe.shuffle(rng);
        shoe
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Gives `per_seat` consecutive cards to each seat of `order` in turn.
    /// Nothing moves unless the whole deal can be supplied.
    pub fn deal(
        &mut self,
        hands: &mut [Hand; 4],
        order: &[Seat],
        per_seat: usize,
    ) -> Result<(), ShoeError> {
        let needed = per_seat * order.len();
        if needed > self.cards.len() {
            return Err(ShoeError::InsufficientCards {
                needed,
                remaining: self.cards.len(),
            });
        }

        let mut dealt = self.cards.drain(..needed);
        for seat in order {
            for card in dealt.by_ref().take(per_seat) {
                hands[seat.index()].add(card);
            }
        }
        Ok(())
    }

    pub fn kick(&mut self) -> Result<Card, ShoeError> {
        if self.cards.is_empty() {
            return Err(ShoeError::EmptyShoe);
        }
        Ok(self.cards.remove(0))
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
