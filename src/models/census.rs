use rust_decimal::Decimal;

/// Census record with the member's personal data. Only `cedula` and
/// `apellidos_nombres` are required; everything else is optional and
/// modeled explicitly rather than passed through as free-form fields.
#[derive(Debug, Clone, Default)]
pub struct PersonalRecord {
    pub id: Option<i64>,
    pub cedula: String,
    pub apellidos_nombres: String,
    pub fecha_nacimiento: Option<String>,
    pub edad: Option<i64>,
    pub es_cristiano: bool,
    pub bautizo: bool,
    pub tipo_sangre: Option<String>,
    pub estado_civil: Option<String>,
    pub sexo: Option<String>,
    pub capacidad_especial: Option<String>,
    pub celular: Option<String>,
    pub telefono_convencional: Option<String>,
    pub conyuge: Option<String>,
    pub correo: Option<String>,
    pub nivel_estudio: Option<String>,
    pub direccion: Option<String>,
    pub ciudad: Option<String>,
    pub created_at: String,
}

impl PersonalRecord {
    pub fn new(cedula: String, apellidos_nombres: String) -> Self {
        Self {
            cedula,
            apellidos_nombres,
            created_at: chrono::Utc::now().to_rfc3339(),
            ..Self::default()
        }
    }
}

/// Census record with the member's church/employment data, linked to the
/// personal record by cedula (by value, not foreign key).
#[derive(Debug, Clone, Default)]
pub struct ChurchRecord {
    pub id: Option<i64>,
    pub cedula: String,
    pub cargo: Option<String>,
    pub local: Option<String>,
    pub jornada_trabajo: Option<String>,
    pub fecha_ingreso: Option<String>,
    pub fecha_salida: Option<String>,
    pub dias_por_mes: Option<i64>,
    pub horas_semanales: Option<i64>,
    pub sueldo: Option<Decimal>,
    pub tipo_pago: Option<String>,
    pub banco: Option<String>,
    pub numero_cuenta: Option<String>,
    pub redil: Option<String>,
    pub otros: Option<String>,
    pub created_at: String,
}

impl ChurchRecord {
    pub fn new(cedula: String) -> Self {
        Self {
            cedula,
            created_at: chrono::Utc::now().to_rfc3339(),
            ..Self::default()
        }
    }
}
