mod tests {
    use approx::assert_relative_eq;

    use crate::mass::{Mass, EARTH_MASS_G, JUPITER_MASS_G, SOLAR_MASS_G};

    #[test]
    fn test_mass_conversions() {
        let jupiter = Mass::from_jupiter_masses(1.0);
        assert_relative_eq!(
            jupiter.to_earth_masses(),
            JUPITER_MASS_G / EARTH_MASS_G,
            max_relative = 1e-12
        );

        let sun = Mass::from_solar_masses(1.0);
        assert_relative_eq!(
            sun.to_jupiter_masses(),
            SOLAR_MASS_G / JUPITER_MASS_G,
            max_relative = 1e-12
        );
        assert_relative_eq!(sun.to_solar_masses(), 1.0, max_relative = 1e-12);

        let earth = Mass::from_earth_masses(1.0);
        assert_relative_eq!(earth.to_earth_masses(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mass_operations() {
        let a = Mass::from_jupiter_masses(1.5);
        let b = Mass::from_jupiter_masses(0.5);

        assert_relative_eq!((a + b).to_jupiter_masses(), 2.0);
        assert_relative_eq!((a * 2.0).to_jupiter_masses(), 3.0);
    }
}
