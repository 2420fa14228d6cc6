use soroban_sdk::{contracterror, contracttype};

/// Contract errors.
///
/// # Code ranges
/// | Range   | Kind                |
/// |---------|---------------------|
/// | 1 – 9   | Lifecycle           |
/// | 10 – 19 | Authorization       |
/// | 20 – 29 | Not found           |
/// | 30 – 39 | Invalid input       |
/// | 40 – 49 | State conflict      |
/// | 50 – 59 | Expired             |
/// | 60 – 69 | Ownership mismatch  |
/// | 70 – 79 | Insufficient funds  |
/// | 80 – 89 | Arithmetic          |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,

    /// The presented capability is of the wrong kind for the operation.
    Unauthorized = 10,
    /// The caller does not currently hold the presented capability.
    NotCapabilityHolder = 11,
    DoctorNotInHospital = 12,
    PharmacistNotInHospital = 13,
    /// A doctor-only amendment was attempted by a different doctor.
    NotTreatmentDoctor = 14,

    CapabilityNotFound = 20,
    HospitalNotFound = 21,
    TreatmentNotFound = 22,
    PatientNotFound = 23,

    InvalidInput = 30,
    InvalidAmount = 31,
    InvalidTimeout = 32,

    PriceAlreadySet = 40,
    AlreadyComplete = 41,
    PriceNotSet = 42,
    NotComplete = 43,
    AlreadyArchived = 44,
    PatientExists = 45,
    SettlementInProgress = 46,
    /// The treatment already has a payer bound.
    PayerAlreadyBound = 47,

    TimedOut = 50,

    NotYourTreatment = 60,
    NotOwner = 61,

    InsufficientFunds = 70,

    Overflow = 80,
}

/// Abstract error taxonomy; every [`ContractError`] belongs to exactly one.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorKind {
    Lifecycle = 1,
    Authorization = 2,
    NotFound = 3,
    InvalidInput = 4,
    StateConflict = 5,
    Expired = 6,
    OwnershipMismatch = 7,
    InsufficientFunds = 8,
    Arithmetic = 9,
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match *self as u32 {
            1..=9 => ErrorKind::Lifecycle,
            10..=19 => ErrorKind::Authorization,
            20..=29 => ErrorKind::NotFound,
            30..=39 => ErrorKind::InvalidInput,
            40..=49 => ErrorKind::StateConflict,
            50..=59 => ErrorKind::Expired,
            60..=69 => ErrorKind::OwnershipMismatch,
            70..=79 => ErrorKind::InsufficientFunds,
            _ => ErrorKind::Arithmetic,
        }
    }
}
