//! Game rules and turn protocol of the engine

use tictactoe_td::{
    Error, Result,
    ports::Player,
    tictactoe::{BoardState, Cell, Game, GameOutcome, GameSettings, Mark},
};

/// Plays a fixed sequence and records every end_game call
struct Scripted {
    mark: Mark,
    moves: Vec<usize>,
    rewards_seen: Vec<f64>,
    final_rewards: Vec<f64>,
}

impl Scripted {
    fn new(mark: Mark, moves: &[usize]) -> Self {
        Self {
            mark,
            moves: moves.iter().rev().copied().collect(),
            rewards_seen: Vec::new(),
            final_rewards: Vec::new(),
        }
    }
}

impl Player for Scripted {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    fn name(&self) -> &str {
        "Scripted"
    }

    fn make_move(&mut self, reward: f64, _state: &BoardState, _available: &[usize]) -> Result<usize> {
        self.rewards_seen.push(reward);
        self.moves.pop().ok_or(Error::NoValidMoves)
    }

    fn end_game(&mut self, reward: f64, _state: &BoardState) {
        self.final_rewards.push(reward);
    }
}

fn settings() -> GameSettings {
    GameSettings {
        win_reward: 10.0,
        lose_reward: -10.0,
        draw_reward: 0.5,
        step_reward: -0.1,
    }
}

mod board_rules {
    use super::*;

    #[test]
    fn parses_separators_and_case() {
        let board = BoardState::from_string("x.o, -X- ,..O").unwrap();
        assert_eq!(board.to_string(), "X-O-X---O");
        assert_eq!(board.get(4), Cell::X);
        assert_eq!(board.empty_cells(), vec![1, 3, 5, 6, 7]);
    }

    #[test]
    fn rejects_bad_boards() {
        assert!(matches!(
            BoardState::from_string("XO"),
            Err(Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            BoardState::from_string("XO?------"),
            Err(Error::InvalidCellCharacter { character: '?', .. })
        ));
    }

    #[test]
    fn occupied_cell_is_invalid() {
        let board = BoardState::new().place(4, Mark::X).unwrap();
        assert!(matches!(
            board.place(4, Mark::O),
            Err(Error::InvalidMove { position: 4 })
        ));
        assert!(matches!(
            board.place(9, Mark::O),
            Err(Error::InvalidMove { position: 9 })
        ));
    }

    #[test]
    fn win_beats_full_board() {
        let board = BoardState::from_string("XXXOOXXOO").unwrap();
        assert_eq!(board.check_winner(), Some(GameOutcome::Win(Mark::X)));

        let draw = BoardState::from_string("XOXXOOOXX").unwrap();
        assert_eq!(draw.check_winner(), Some(GameOutcome::Draw));

        assert_eq!(BoardState::new().check_winner(), None);
    }
}

mod turn_protocol {
    use super::*;

    #[test]
    fn winner_and_loser_each_get_one_end_game() {
        let mut x = Scripted::new(Mark::X, &[0, 1, 2]);
        let mut o = Scripted::new(Mark::O, &[3, 4]);

        let outcome = {
            let mut game = Game::new(settings(), &mut x, &mut o);
            game.play_to_end().unwrap()
        };

        assert_eq!(outcome, GameOutcome::Win(Mark::X));
        assert_eq!(x.final_rewards, vec![10.0]);
        assert_eq!(o.final_rewards, vec![-10.0]);
        assert_eq!(x.rewards_seen, vec![-0.1; 3]);
        assert_eq!(o.rewards_seen, vec![-0.1; 2]);
    }

    #[test]
    fn draw_rewards_both_players() {
        // X O X / X O O / O X X
        let mut x = Scripted::new(Mark::X, &[0, 2, 3, 7, 8]);
        let mut o = Scripted::new(Mark::O, &[1, 4, 5, 6]);

        let mut game = Game::new(settings(), &mut x, &mut o);
        assert_eq!(game.play_to_end().unwrap(), GameOutcome::Draw);
        assert_eq!(game.moves().len(), 9);
        drop(game);

        assert_eq!(x.final_rewards, vec![0.5]);
        assert_eq!(o.final_rewards, vec![0.5]);
    }

    #[test]
    fn moves_after_the_end_are_rejected() {
        let mut x = Scripted::new(Mark::X, &[0, 1, 2, 8]);
        let mut o = Scripted::new(Mark::O, &[3, 4, 5]);

        let mut game = Game::new(settings(), &mut x, &mut o);
        game.play_to_end().unwrap();
        assert!(matches!(game.make_move(), Err(Error::GameOver)));
    }

    #[test]
    fn illegal_choice_is_reported() {
        let mut x = Scripted::new(Mark::X, &[4]);
        let mut o = Scripted::new(Mark::O, &[4]);

        let mut game = Game::new(settings(), &mut x, &mut o);
        assert_eq!(game.make_move().unwrap(), None);
        assert!(matches!(
            game.make_move(),
            Err(Error::InvalidMove { position: 4 })
        ));
        assert_eq!(game.board().get(4), Cell::X);
        assert_eq!(game.next_turn(), Mark::O);
    }
}
