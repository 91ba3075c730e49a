/// One inventoried asset. Inventory is period-independent: items reference
/// the global option lists (ubicacion, ministerio, estado) by name.
#[derive(Debug, Clone)]
pub struct InventoryItem {
    pub id: Option<i64>,
    pub cantidad: i64,
    pub codigo: String,
    pub detalle: String,
    pub numero_serie: String,
    pub ubicacion: String,
    pub ministerio: String,
    pub estado: String,
    pub fecha_registro: String,
}

impl InventoryItem {
    pub fn new(codigo: String, detalle: String, cantidad: i64) -> Self {
        Self {
            id: None,
            cantidad,
            codigo,
            detalle,
            numero_serie: String::new(),
            ubicacion: String::new(),
            ministerio: String::new(),
            estado: String::new(),
            fecha_registro: chrono::Utc::now().to_rfc3339(),
        }
    }
}
