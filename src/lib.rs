pub mod configuration;

pub mod manager {
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod constants;

    pub mod integration {
        pub mod integrationerror;
        pub mod exitcondition;
        pub mod resultstate;
        pub mod bound;
        pub mod integrand;
        pub mod integrator;
        pub mod integratorconfiguration;
        pub mod integratorconfigurationmanager;

        pub mod gausskronrod {
            pub mod gausskronrodtable;
            pub mod onestepevaluator;
            pub mod gausskronrodintegrator;
        }

        pub mod gausslobatto {
            pub mod gausslobattointegrator;
        }
    }
}
