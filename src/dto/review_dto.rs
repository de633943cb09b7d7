use serde::Serialize;
use validator::Validate;

// Nueva reseña - el autor lo determina el backend por el token
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,

    #[validate(length(min = 1, max = 1000))]
    pub comment: String,
}
