pub mod activities;
pub mod auth;
pub mod employees;
pub mod inventory;
pub mod sections;

use uuid::Uuid;

use crate::common::error::AppError;

// Los IDs llegan como segmentos de ruta; uno malformado es un 400 con
// mensaje propio, no un rechazo genérico del framework.
pub(crate) fn parse_id(id: &str, message: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_valid_uuids() {
        assert!(parse_id("550e8400-e29b-41d4-a716-446655440000", "ID no válido.").is_ok());
    }

    #[test]
    fn parse_id_rejects_garbage_with_the_given_message() {
        let err = parse_id("abc123", "ID de artículo no válido.").unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert_eq!(msg, "ID de artículo no válido."),
            other => panic!("se esperaba BadRequest, llegó {:?}", other),
        }
    }
}
