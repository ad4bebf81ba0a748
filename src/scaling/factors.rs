use super::{Role, ScalingError};

/// Target extent of every controlling region, in [`Role::ALL`] order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDimensions {
    dimensions: [f64; 13],
}

impl TargetDimensions {
    /// Accepts exactly 13 finite, positive dimensions in [`Role::ALL`] order
    pub fn from_slice(values: &[f64]) -> Result<Self, ScalingError> {
        let dimensions: [f64; 13] = values.try_into().map_err(|_| {
            ScalingError::Configuration(format!(
                "{} target dimensions were supplied, but {} are expected",
                values.len(),
                Role::ALL.len()
            ))
        })?;

        if let Some((role, value)) = Role::ALL
            .iter()
            .zip(dimensions.iter())
            .find(|(_, value)| !value.is_finite() || **value <= 0.0)
        {
            return Err(ScalingError::Configuration(format!(
                "The {} must be a positive number; found {}",
                role.description(),
                value
            )));
        }

        Ok(Self { dimensions })
    }

    pub fn get(&self, role: Role) -> f64 {
        self.dimensions[role.index()]
    }

    /// Divide each target dimension by the extent of its region in the reference mesh
    pub fn scale_factors(&self) -> ScaleFactors {
        let mut factors = [1.0; 13];
        for role in Role::ALL {
            factors[role.index()] = self.get(role) / role.reference_dimension();
        }
        ScaleFactors { factors }
    }
}

/// Dimensionless scale factor of every controlling region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    factors: [f64; 13],
}

impl ScaleFactors {
    /// All factors equal to 1 (the reference geometry)
    pub fn identity() -> Self {
        Self { factors: [1.0; 13] }
    }

    pub fn with(mut self, role: Role, factor: f64) -> Self {
        self.factors[role.index()] = factor;
        self
    }

    pub fn get(&self, role: Role) -> f64 {
        self.factors[role.index()]
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::identity()
    }
}

/// The list of expected target dimensions, as shown when the wrong ones are supplied
pub fn dimension_usage() -> String {
    let mut usage = format!(
        "{} target dimensions are expected, in this order:",
        Role::ALL.len()
    );
    for (idx, role) in Role::ALL.iter().enumerate() {
        usage.push_str(&format!(
            "\n\t({:>2}) {} (reference = {} units)",
            idx + 1,
            role.description(),
            role.reference_dimension()
        ));
    }
    usage
}
