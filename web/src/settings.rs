use clap::{Args, ValueEnum};
use lexigrid_core as game;
use yew::Properties;

use crate::utils::{js_random_seed, seed_from_str};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Reshuffle {
    /// Letters are drawn once per page load
    #[default]
    Once,
    /// Letters are redrawn whenever a round starts
    EveryRound,
}

impl From<Reshuffle> for game::ReshufflePolicy {
    fn from(value: Reshuffle) -> Self {
        match value {
            Reshuffle::Once => Self::OnLoad,
            Reshuffle::EveryRound => Self::EveryRound,
        }
    }
}

/// Options read from the page location hash, e.g. `#-vv&--seed=42&--reshuffle=every-round`.
#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<String>,

    /// When the grid gets new letters
    #[arg(long, value_enum, default_value_t = Reshuffle::Once)]
    pub reshuffle: Reshuffle,

    /// Number of cells per side
    #[arg(long, default_value_t = game::GameConfig::DEFAULT_SIZE.0)]
    pub grid_size: game::Coord,

    /// How many top scores to keep
    #[arg(long, default_value_t = game::GameConfig::DEFAULT_LEADERBOARD_SIZE)]
    pub leaderboard_size: usize,

    /// Dictionary endpoint, the word is appended as the last path segment
    #[arg(long, default_value = game::DEFAULT_DICTIONARY_URL)]
    pub dictionary_url: String,
}

impl GameProps {
    pub(crate) fn game_config(&self) -> game::GameConfig {
        game::GameConfig::new(
            (self.grid_size, self.grid_size),
            self.leaderboard_size,
            self.reshuffle.into(),
        )
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed
            .as_deref()
            .map_or_else(js_random_seed, seed_from_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestArgs {
        #[command(flatten)]
        game: GameProps,
    }

    fn parse(hash: &str) -> GameProps {
        TestArgs::try_parse_from(hash.split(['#', '&'])).unwrap().game
    }

    #[test]
    fn defaults_match_core_config() {
        let props = parse("");

        assert_eq!(props.game_config(), game::GameConfig::default());
        assert_eq!(props.dictionary_url, game::DEFAULT_DICTIONARY_URL);
    }

    #[test]
    fn hash_options_override_config() {
        let props = parse("#--reshuffle=every-round&--leaderboard-size=5&--grid-size=4&--seed=abc");
        let config = props.game_config();

        assert_eq!(config.reshuffle, game::ReshufflePolicy::EveryRound);
        assert_eq!(config.leaderboard_size, 5);
        assert_eq!(config.size, (4, 4));
        assert_eq!(props.seed(), seed_from_str("abc"));
    }
}
