//! Service-order metadata and the flat persistence record.
//!
//! The persistence layer stores one row per service order in the `entradas`
//! table. [`ServiceOrderRecord`] mirrors that row; the engine only builds it.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BillingResult, ServiceOrderCalculation};
use crate::error::{EngineError, EngineResult};

/// Descriptive data about a service order (O.S.).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOrder {
    /// The service-order number printed on the O.S.
    #[serde(default)]
    pub order_number: String,
    /// Client name.
    #[serde(default)]
    pub client: String,
    /// Free-text description of the work done.
    #[serde(default)]
    pub description: String,
    /// Asset tag (patrimônio) of the serviced equipment.
    #[serde(default)]
    pub asset_tag: String,
    /// Machine or equipment model.
    #[serde(default)]
    pub machine: String,
    /// User who entered the order.
    #[serde(default)]
    pub recorded_by: String,
}

/// Payment state of an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Awaiting payment.
    #[default]
    #[serde(rename = "Pendente")]
    Pending,
    /// Paid.
    #[serde(rename = "Pago")]
    Paid,
}

/// One `entradas` row, keyed with the column names used by the store.
///
/// Monetary fields are rounded to cents; hour quantities are kept exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOrderRecord {
    /// Service date.
    #[serde(rename = "data")]
    pub date: NaiveDate,
    /// Start time, absent for lab services.
    #[serde(rename = "hora_inicio")]
    pub start_time: Option<NaiveTime>,
    /// End time, absent for lab services.
    #[serde(rename = "hora_fim")]
    pub end_time: Option<NaiveTime>,
    /// Service-order number.
    #[serde(rename = "ordem_servico")]
    pub order_number: String,
    /// Work description.
    #[serde(rename = "descricao_servico")]
    pub description: String,
    /// Asset tag.
    #[serde(rename = "patrimonio")]
    pub asset_tag: String,
    /// Machine.
    #[serde(rename = "maquina")]
    pub machine: String,
    /// Client.
    #[serde(rename = "cliente")]
    pub client: String,
    /// Grand total.
    #[serde(rename = "valor_atendimento")]
    pub total_value: Decimal,
    /// Normal hours value.
    #[serde(rename = "horas_tecnicas")]
    pub normal_hours_value: Decimal,
    /// Premium-50 hours value.
    #[serde(rename = "horas_tecnicas_50")]
    pub premium_50_value: Decimal,
    /// Premium-100 hours value.
    #[serde(rename = "horas_tecnicas_100")]
    pub premium_100_value: Decimal,
    /// Kilometre value.
    #[serde(rename = "km")]
    pub km_value: Decimal,
    /// Meal value.
    #[serde(rename = "refeicao")]
    pub meal_value: Decimal,
    /// Parts value.
    #[serde(rename = "pecas")]
    pub parts_value: Decimal,
    /// Toll value.
    #[serde(rename = "pedagio")]
    pub toll_value: Decimal,
    /// Laboratory value.
    #[serde(rename = "valor_laboratorio")]
    pub lab_value: Decimal,
    /// Technician count.
    #[serde(rename = "qtd_tecnicos")]
    pub technician_count: u32,
    /// Transportation per technician.
    #[serde(rename = "valor_deslocamento")]
    pub transport_value_per_technician: Decimal,
    /// Transportation for the whole team.
    #[serde(rename = "valor_deslocamento_total")]
    pub transport_total: Decimal,
    /// Hourly rate for the whole team.
    #[serde(rename = "valor_hora_tecnica_total")]
    pub team_hourly_rate: Decimal,
    /// Normal hours worked.
    #[serde(rename = "horas_normais")]
    pub normal_hours: Decimal,
    /// Premium-50 hours worked.
    #[serde(rename = "horas_extra_50")]
    pub premium_50_hours: Decimal,
    /// Premium-100 hours worked.
    #[serde(rename = "horas_extra_100")]
    pub premium_100_hours: Decimal,
    /// Payment status.
    pub status: PaymentStatus,
    /// User who entered the order.
    #[serde(rename = "usuario_lancamento")]
    pub recorded_by: String,
}

impl ServiceOrderRecord {
    /// Flattens a field-service calculation into a new pending record.
    ///
    /// Money columns are rounded to cents and `valor_atendimento` is the sum
    /// of the rounded columns.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when the team hourly rate does not
    /// fit in a `Decimal`.
    pub fn from_calculation(calculation: &ServiceOrderCalculation) -> EngineResult<Self> {
        let input = &calculation.input;
        let billing = calculation.billing.rounded()?;
        let technicians = Decimal::from(input.technician_count);
        let team_hourly_rate = input
            .hourly_rate
            .checked_mul(technicians)
            .ok_or_else(|| EngineError::invalid_input("hourly_rate", "value too large"))?;

        let mut record = Self::base(&calculation.order, input.service_date, &billing);
        record.start_time = Some(input.start_time);
        record.end_time = Some(input.end_time);
        record.technician_count = input.technician_count;
        record.transport_value_per_technician = input.transport_value_per_technician;
        record.team_hourly_rate = team_hourly_rate;
        record.normal_hours = calculation.classified.normal_hours();
        record.premium_50_hours = calculation.classified.premium_50_hours();
        record.premium_100_hours = calculation.classified.premium_100_hours();
        Ok(record)
    }

    /// Builds a pending record for a laboratory service.
    ///
    /// Lab services have no shift, so times are empty and the technician
    /// count and hour fields stay zero.
    pub fn lab_service(
        order: &ServiceOrder,
        date: NaiveDate,
        billing: &BillingResult,
    ) -> EngineResult<Self> {
        Ok(Self::base(order, date, &billing.rounded()?))
    }

    fn base(order: &ServiceOrder, date: NaiveDate, billing: &BillingResult) -> Self {
        Self {
            date,
            start_time: None,
            end_time: None,
            order_number: order.order_number.clone(),
            description: order.description.clone(),
            asset_tag: order.asset_tag.clone(),
            machine: order.machine.clone(),
            client: order.client.clone(),
            total_value: billing.total_value,
            normal_hours_value: billing.normal_hours_value,
            premium_50_value: billing.premium_50_value,
            premium_100_value: billing.premium_100_value,
            km_value: billing.km_value,
            meal_value: billing.meal_value,
            parts_value: billing.parts_value,
            toll_value: billing.toll_value,
            lab_value: billing.lab_value,
            technician_count: 0,
            transport_value_per_technician: Decimal::ZERO,
            transport_total: billing.transport_total,
            team_hourly_rate: Decimal::ZERO,
            normal_hours: Decimal::ZERO,
            premium_50_hours: Decimal::ZERO,
            premium_100_hours: Decimal::ZERO,
            status: PaymentStatus::Pending,
            recorded_by: order.recorded_by.clone(),
        }
    }
}
