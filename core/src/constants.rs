use std::f64::consts::PI;

pub const MIN_PRIZES: usize = 2;
pub const FREE_TIER_MAX_PRIZES: usize = 8;

pub const DEFAULT_PRIZE_NAMES: [&str; 4] = ["PREMIO 1", "PREMIO 2", "PREMIO 3", "PREMIO 4"];
pub const DEFAULT_PRIZE_STOCK: i64 = 10;
pub const DEFAULT_PRIZE_WEIGHT: f64 = 100.0;

// Animation
pub const SPIN_DURATION_MS: f64 = 6000.0;
pub const EXTRA_TURNS: u32 = 10;
pub const POINTER_ANGLE: f64 = PI * 1.5; // Pointer sits at the top of the wheel

// Env overrides
pub const EXTRA_TURNS_ENV: &str = "WHEEL_EXTRA_TURNS";
pub const SPIN_DURATION_ENV: &str = "WHEEL_SPIN_DURATION_MS";

pub const NO_STOCK_NOTICE: &str = "SISTEMA: No hay stock disponible de ningún premio.";
pub const MIN_PRIZES_NOTICE: &str = "SISTEMA: Se requieren al menos 2 premios.";
pub const REQUIRED_FIELDS_NOTICE: &str = "Complete todos los campos obligatorios";
pub const INVALID_EMAIL_NOTICE: &str = "Ingrese un correo electrónico válido";
pub const DUPLICATE_BUTTON_LABEL: &str = "IDENTIDAD DUPLICADA";
pub const SUBMIT_BUTTON_LABEL: &str = "REGISTRAR Y GIRAR";

pub fn duplicate_notice(field_label: &str) -> String {
    format!("ACCESO DENEGADO: El {} ya tiene un registro previo.", field_label)
}
