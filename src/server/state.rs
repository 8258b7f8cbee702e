use crate::location::Normalizer;

pub struct AppState {
    pub normalizer: Normalizer,
}
