use serde::{Deserialize, Serialize};

// Conversion factor between the Glicko-1 scale (rating ~1500, rd ~350)
// and the internal Glicko-2 scale (mu ~0, phi ~2), per Glickman's paper.
const SCALE: f64 = 173.7178;
const VOLATILITY_TOLERANCE: f64 = 1e-6;
const DEFAULT_TAU: f64 = 0.5;
const DEFAULT_MAX_RD: f64 = 350.0;

const DEFAULT_RATING: f64 = 1500.0;
const DEFAULT_RD: f64 = 350.0;
const DEFAULT_VOLATILITY: f64 = 0.06;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glicko2Rating {
    pub rating: f64,
    pub rd: f64,
    pub volatility: f64,
}

impl Glicko2Rating {
    pub const fn new(rating: f64, rd: f64, volatility: f64) -> Self {
        Self { rating, rd, volatility }
    }
}

impl Default for Glicko2Rating {
    // A player with no rating history: {1500, 350, 0.06}.
    fn default() -> Self {
        Self::new(DEFAULT_RATING, DEFAULT_RD, DEFAULT_VOLATILITY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameResult {
    pub opponent_rating: f64,
    pub opponent_rd: f64,
    // 1.0 win, 0.5 draw, 0.0 loss, from the rated player's point of view
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingConfig {
    pub max_rd: f64,
    pub tau: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self { max_rd: DEFAULT_MAX_RD, tau: DEFAULT_TAU }
    }
}

// mu/phi pair on the Glicko-2 internal scale
struct ScaledRating {
    mu: f64,
    phi: f64,
}

fn to_glicko2_scale(rating: f64, rd: f64) -> ScaledRating {
    ScaledRating { mu: (rating - DEFAULT_RATING) / SCALE, phi: rd / SCALE }
}

fn from_glicko2_scale(mu: f64, phi: f64) -> (f64, f64) {
    (mu * SCALE + DEFAULT_RATING, phi * SCALE)
}

// The "g" reduction of an opponent's rating deviation, per the Glicko-2 spec.
fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (std::f64::consts::PI * std::f64::consts::PI)).sqrt()
}

// Expected score of a player (mu) against an opponent (mu_j, phi_j).
fn expected_score(mu: f64, mu_j: f64, phi_j: f64) -> f64 {
    1.0 / (1.0 + (-g(phi_j) * (mu - mu_j)).exp())
}

// Runs the full Glicko-2 update for one rating period. `results` is every
// game the player completed in the period; an empty slice only decays rd.
pub fn update_rating(current: Glicko2Rating, results: &[GameResult], config: &RatingConfig) -> Glicko2Rating {
    let scaled = to_glicko2_scale(current.rating, current.rd);

    if results.is_empty() {
        let phi_star = (scaled.phi * scaled.phi + current.volatility * current.volatility).sqrt();
        let (rating, rd) = from_glicko2_scale(scaled.mu, phi_star);
        return Glicko2Rating::new(rating, rd.min(config.max_rd), current.volatility);
    }

    let opponents: Vec<ScaledRating> = results.iter()
        .map(|r| to_glicko2_scale(r.opponent_rating, r.opponent_rd))
        .collect();

    let variance = compute_variance(&scaled, &opponents);
    let delta = compute_delta(&scaled, &opponents, results, variance);

    let new_volatility = solve_volatility(scaled.phi, current.volatility, variance, delta, config.tau);

    let phi_star = (scaled.phi * scaled.phi + new_volatility * new_volatility).sqrt();
    let new_phi = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / variance).sqrt();

    let mu_update: f64 = results.iter().zip(opponents.iter())
        .map(|(r, opp)| g(opp.phi) * (r.score - expected_score(scaled.mu, opp.mu, opp.phi)))
        .sum();
    let new_mu = scaled.mu + new_phi * new_phi * mu_update;

    let (rating, rd) = from_glicko2_scale(new_mu, new_phi);
    Glicko2Rating::new(rating, rd.min(config.max_rd), new_volatility)
}

// Applies the rating-deviation-only decay of an idle player across
// `periods` rating periods with no games, capping at `max_rd`.
pub fn apply_rd_decay(rating: Glicko2Rating, periods: u32, config: &RatingConfig) -> Glicko2Rating {
    let scaled = to_glicko2_scale(rating.rating, rating.rd);
    let mut phi = scaled.phi;
    for _ in 0..periods {
        phi = (phi * phi + rating.volatility * rating.volatility).sqrt();
    }
    let (_, rd) = from_glicko2_scale(scaled.mu, phi);
    Glicko2Rating::new(rating.rating, rd.min(config.max_rd), rating.volatility)
}

fn compute_variance(player: &ScaledRating, opponents: &[ScaledRating]) -> f64 {
    let sum: f64 = opponents.iter()
        .map(|opp| {
            let gp = g(opp.phi);
            let e = expected_score(player.mu, opp.mu, opp.phi);
            gp * gp * e * (1.0 - e)
        })
        .sum();
    1.0 / sum
}

fn compute_delta(player: &ScaledRating, opponents: &[ScaledRating], results: &[GameResult], variance: f64) -> f64 {
    let sum: f64 = results.iter().zip(opponents.iter())
        .map(|(r, opp)| g(opp.phi) * (r.score - expected_score(player.mu, opp.mu, opp.phi)))
        .sum();
    variance * sum
}

// Illinois variant of regula falsi, solving f(x) = 0 for the new
// volatility's logarithm, as prescribed by the published Glicko-2 algorithm.
fn solve_volatility(phi: f64, volatility: f64, variance: f64, delta: f64, tau: f64) -> f64 {
    let a = (volatility * volatility).ln();
    let f = |x: f64| -> f64 {
        let ex = x.exp();
        let num = ex * (delta * delta - phi * phi - variance - ex);
        let denom = 2.0 * (phi * phi + variance + ex).powi(2);
        num / denom - (x - a) / (tau * tau)
    };

    let mut lower;
    let mut upper;
    let mut f_lower = f(a);
    let mut f_upper;

    if delta * delta > phi * phi + variance {
        lower = a;
        upper = (delta * delta - phi * phi - variance).ln();
        f_upper = f(upper);
    } else {
        lower = a;
        let mut k = 1.0;
        loop {
            upper = a - k * tau;
            f_upper = f(upper);
            if f_upper < 0.0 {
                break;
            }
            k += 1.0;
        }
    }

    while (upper - lower).abs() > VOLATILITY_TOLERANCE {
        let mid = lower + (lower - upper) * f_lower / (f_upper - f_lower);
        let f_mid = f(mid);

        if f_mid * f_upper < 0.0 {
            lower = upper;
            f_lower = f_upper;
        } else {
            f_lower /= 2.0;
        }

        upper = mid;
        f_upper = f_mid;
    }

    (lower / 2.0).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Glickman's own worked example (Example in the Glicko-2 paper):
    // a player rated {1500, 200, 0.06} plays three games in one period
    // against opponents of known rating/rd, with known outcomes, and the
    // published result is rating ~1464.06, rd ~151.52, volatility ~0.05999.
    #[test]
    fn matches_the_published_worked_example() {
        let player = Glicko2Rating::new(1500.0, 200.0, 0.06);
        let results = vec![
            GameResult { opponent_rating: 1400.0, opponent_rd: 30.0, score: 1.0 },
            GameResult { opponent_rating: 1550.0, opponent_rd: 100.0, score: 0.0 },
            GameResult { opponent_rating: 1700.0, opponent_rd: 300.0, score: 0.0 },
        ];
        let config = RatingConfig::default();

        let updated = update_rating(player, &results, &config);

        assert!((updated.rating - 1464.06).abs() < 0.5);
        assert!((updated.rd - 151.52).abs() < 0.5);
        assert!((updated.volatility - 0.05999).abs() < 0.0001);
    }

    #[test]
    fn an_empty_result_set_only_decays_the_deviation() {
        let player = Glicko2Rating::new(1500.0, 200.0, 0.06);
        let config = RatingConfig::default();

        let updated = update_rating(player, &[], &config);

        assert_eq!(updated.rating, player.rating);
        assert_eq!(updated.volatility, player.volatility);
        assert!(updated.rd > player.rd);
    }

    #[test]
    fn rd_is_capped_at_the_configured_maximum() {
        let player = Glicko2Rating::new(1500.0, 349.9, 0.06);
        let config = RatingConfig::default();

        let updated = apply_rd_decay(player, 20, &config);

        assert_eq!(updated.rd, config.max_rd);
    }

    #[test]
    fn winning_against_a_lower_rated_opponent_raises_rating_less_than_an_upset() {
        let player = Glicko2Rating::new(1500.0, 100.0, 0.06);
        let config = RatingConfig::default();

        let beat_weaker = update_rating(player, &[GameResult {
            opponent_rating: 1300.0, opponent_rd: 50.0, score: 1.0,
        }], &config);

        let beat_stronger = update_rating(player, &[GameResult {
            opponent_rating: 1700.0, opponent_rd: 50.0, score: 1.0,
        }], &config);

        assert!(beat_stronger.rating > beat_weaker.rating);
    }
}
