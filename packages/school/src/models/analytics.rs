use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LetterQuery {
    /// Leading letters to match, case-insensitive. Defaults to `A`.
    pub letter: Option<String>,
}
