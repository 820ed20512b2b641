use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::utils::fields::{loose_id, loose_text, truthy};

/// 实验室预约，`(sala, dia, horario)` 在表上唯一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Agendamento {
    pub id: i32,
    pub professor_id: i32,
    pub materia: String,
    pub tecnico: bool,
    pub sala: String,
    pub dia: String,
    pub horario: String,
}

#[derive(Debug, Deserialize)]
pub struct BookRequest {
    #[serde(default, deserialize_with = "loose_id")]
    pub professor_id: Option<i32>,
    #[serde(default, deserialize_with = "loose_text")]
    pub materia: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub tecnico: bool,
    #[serde(default, deserialize_with = "loose_text")]
    pub sala: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub dia: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub horario: Option<String>,
}

/// 通过必填检查后的预约
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub professor_id: i32,
    pub materia: String,
    pub tecnico: bool,
    pub sala: String,
    pub dia: String,
    pub horario: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BookingListResponse {
    pub agendamentos: Vec<Agendamento>,
}

pub(super) const BOOK_REQUIRED: &str = "Dados incompletos";
pub(super) const BOOK_FAILED: &str = "Erro ao agendar";

impl BookRequest {
    pub fn required(self) -> Result<NewBooking, AppError> {
        match (self.professor_id, self.materia, self.sala, self.dia, self.horario) {
            (Some(professor_id), Some(materia), Some(sala), Some(dia), Some(horario)) => {
                Ok(NewBooking {
                    professor_id,
                    materia,
                    tecnico: self.tecnico,
                    sala,
                    dia,
                    horario,
                })
            }
            _ => Err(AppError::InvalidInput(BOOK_REQUIRED)),
        }
    }
}

impl Agendamento {
    /// 直接插入，时段冲突交给唯一约束判定，两个并发请求只有一个能成功
    pub async fn book(pool: &PgPool, booking: &NewBooking) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO agendamentos (professor_id, materia, tecnico, sala, dia, horario)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(booking.professor_id)
        .bind(&booking.materia)
        .bind(booking.tecnico)
        .bind(&booking.sala)
        .bind(&booking.dia)
        .bind(&booking.horario)
        .execute(pool)
        .await
        .map_err(|e| AppError::from_insert(e, AppError::SlotConflict))?;

        tracing::info!(
            "Professor {} booked {} on {} at {}",
            booking.professor_id,
            booking.sala,
            booking.dia,
            booking.horario
        );
        Ok(())
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let agendamentos = sqlx::query_as::<_, Agendamento>(
            r#"
            SELECT id, professor_id, materia, tecnico, sala, dia, horario
            FROM agendamentos
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(agendamentos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> BookRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_complete_request_passes() {
        let booking = request(json!({
            "professor_id": "4",
            "materia": "Bio",
            "sala": "Lab1",
            "dia": "2024-05-01",
            "horario": "10:00"
        }))
        .required()
        .unwrap();

        assert_eq!(booking.professor_id, 4);
        assert_eq!(booking.sala, "Lab1");
        assert!(!booking.tecnico, "tecnico defaults to false");
    }

    #[test]
    fn test_each_required_field_is_checked() {
        let full = json!({
            "professor_id": 1,
            "materia": "Bio",
            "sala": "Lab1",
            "dia": "2024-05-01",
            "horario": "10:00"
        });

        for field in ["professor_id", "materia", "sala", "dia", "horario"] {
            let mut partial = full.clone();
            partial.as_object_mut().unwrap().remove(field);
            assert!(
                matches!(
                    request(partial).required(),
                    Err(AppError::InvalidInput(BOOK_REQUIRED))
                ),
                "missing {} must be rejected",
                field
            );
        }
    }

    #[test]
    fn test_tecnico_is_optional_and_coerced() {
        let booking = request(json!({
            "professor_id": 1,
            "materia": "Bio",
            "tecnico": 1,
            "sala": "Lab1",
            "dia": "2024-05-01",
            "horario": "10:00"
        }))
        .required()
        .unwrap();
        assert!(booking.tecnico);
    }

    #[test]
    fn test_booking_serializes_all_columns() {
        let booking = Agendamento {
            id: 1,
            professor_id: 2,
            materia: "Bio".into(),
            tecnico: true,
            sala: "Lab1".into(),
            dia: "2024-05-01".into(),
            horario: "10:00".into(),
        };
        assert_eq!(
            serde_json::to_value(booking).unwrap(),
            json!({
                "id": 1,
                "professor_id": 2,
                "materia": "Bio",
                "tecnico": true,
                "sala": "Lab1",
                "dia": "2024-05-01",
                "horario": "10:00"
            })
        );
    }
}
