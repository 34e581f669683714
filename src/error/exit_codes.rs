use crate::error::IsoListError;

pub fn get_exit_code(error: &IsoListError) -> i32 {
    match error {
        IsoListError::InvalidConfig(_)
        | IsoListError::ConfigError(_)
        | IsoListError::InvalidPattern { .. }
        | IsoListError::Catalog(_)
        | IsoListError::Yaml(_) => 2,

        IsoListError::DistributionNotFound(_) => 3,

        IsoListError::NetworkError(_) | IsoListError::HttpStatus { .. } => 20,

        _ => 1,
    }
}
