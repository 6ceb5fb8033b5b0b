pub mod configuration;

pub mod math {
    pub mod curve {
        pub mod point2d;
    }

    pub mod integrand {
        pub mod integrand;
        pub mod integrandregistry;
    }

    pub mod quadrature {
        pub mod quadratureerror;
        pub mod weightedsimpsonrule;
        pub mod adaptiverefiner;
        pub mod infiniteintervalaccumulator;
        pub mod gausslaguerrequadrature;
    }
}

pub mod report {
    pub mod comparison;
    pub mod weightsampler;
}
