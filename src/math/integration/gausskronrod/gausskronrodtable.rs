use serde::Deserialize;

use crate::math::integration::integrationerror::IntegrationError;

// ─────────────────────────────────────────────────────────────────────────────
// Gauss-Kronrod 係數表
// ─────────────────────────────────────────────────────────────────────────────
//
// (2n+1) 點 Kronrod 規則嵌入 n 點 Gauss-Legendre 規則，共用節點：
//
//   NODES           : k = order div 2 個正節點（遞減排列，不含 0）
//                     奇數索引 1, 3, 5, ... 為 Gauss 節點
//   KRONROD_WEIGHTS : k 個對稱權重 + 最後一個中心（x = 0）權重
//   GAUSS_WEIGHTS   : 對應 NODES[1], NODES[3], ... 的權重；
//                     n 為奇數時（15, 31, 51）最後一個為中心權重
//
// 節點對 0 對稱，只存非負半邊；Kronrod 權重在 [−1, 1] 上總和為 2。
// 數值依 QUADPACK qk15 ... qk61 的係數表，取 20 位有效數字。

const K15_NODES: [f64; 7] = [
    0.99145537112081263921,
    0.94910791234275852453,
    0.86486442335976907279,
    0.74153118559939443986,
    0.58608723546769113029,
    0.40584515137739716691,
    0.2077849550078984676,
];

const K15_KRONROD_WEIGHTS: [f64; 8] = [
    0.022935322010529224964,
    0.063092092629978553291,
    0.10479001032225018384,
    0.14065325971552591875,
    0.16900472663926790283,
    0.19035057806478540991,
    0.20443294007529889241,
    0.20948214108472782801,
];

const K15_GAUSS_WEIGHTS: [f64; 4] = [
    0.12948496616886969327,
    0.2797053914892766679,
    0.38183005050511894495,
    0.41795918367346938776,
];

const K21_NODES: [f64; 10] = [
    0.99565716302580808074,
    0.97390652851717172008,
    0.930157491355708226,
    0.86506336668898451073,
    0.78081772658641689706,
    0.67940956829902440623,
    0.56275713466860468334,
    0.4333953941292471908,
    0.29439286270146019813,
    0.14887433898163121088,
];

const K21_KRONROD_WEIGHTS: [f64; 11] = [
    0.011694638867371874278,
    0.032558162307964727479,
    0.054755896574351996031,
    0.075039674810919952767,
    0.093125454583697605535,
    0.1093871588022976419,
    0.12349197626206585108,
    0.13470921731147332593,
    0.1427759385770600808,
    0.14773910490133849137,
    0.14944555400291690566,
];

const K21_GAUSS_WEIGHTS: [f64; 5] = [
    0.066671344308688137594,
    0.14945134915058059315,
    0.219086362515982044,
    0.26926671930999635509,
    0.29552422471475287017,
];

const K31_NODES: [f64; 15] = [
    0.99800229869339706029,
    0.98799251802048542849,
    0.96773907567913913426,
    0.93727339240070590431,
    0.89726453234408190088,
    0.8482065834104272162,
    0.79041850144246593297,
    0.72441773136017004742,
    0.65099674129741697053,
    0.57097217260853884754,
    0.48508186364023968069,
    0.3941513470775633699,
    0.29918000715316881217,
    0.2011940939974345223,
    0.10114206691871749903,
];

const K31_KRONROD_WEIGHTS: [f64; 16] = [
    0.0053774798729233489878,
    0.015007947329316122538,
    0.025460847326715320187,
    0.035346360791375846222,
    0.044589751324764876608,
    0.053481524690928087265,
    0.062009567800670640285,
    0.06985412131872825871,
    0.076849680757720378894,
    0.083080502823133021038,
    0.088564443056211770647,
    0.093126598170825321225,
    0.096642726983623678505,
    0.099173598721791959332,
    0.10076984552387559504,
    0.10133000701479154902,
];

const K31_GAUSS_WEIGHTS: [f64; 8] = [
    0.030753241996117268355,
    0.070366047488108124709,
    0.10715922046717193501,
    0.13957067792615431445,
    0.16626920581699393355,
    0.18616100001556221103,
    0.19843148532711157646,
    0.20257824192556127288,
];

const K41_NODES: [f64; 20] = [
    0.99885903158827766384,
    0.99312859918509492479,
    0.98150787745025025919,
    0.96397192727791379127,
    0.94082263383175475352,
    0.91223442825132590587,
    0.87827681125228197608,
    0.83911697182221882339,
    0.79504142883755119835,
    0.74633190646015079261,
    0.69323765633475138481,
    0.63605368072651502545,
    0.57514044681971031534,
    0.510867001950827098,
    0.4435931752387251032,
    0.37370608871541956067,
    0.30162786811491300432,
    0.22778585114164507808,
    0.15260546524092267551,
    0.076526521133497333755,
];

const K41_KRONROD_WEIGHTS: [f64; 21] = [
    0.0030735837185205315012,
    0.0086002698556429421987,
    0.014626169256971252984,
    0.020388373461266523598,
    0.025882133604951158835,
    0.031287306777032798959,
    0.036600169758200798031,
    0.041668873327973686264,
    0.04643482186749767472,
    0.050944573923728691933,
    0.055195105348285994745,
    0.059111400880639572375,
    0.062653237554781168026,
    0.065834597133618422112,
    0.068648672928521619346,
    0.071054423553444068306,
    0.073030690332786667495,
    0.074582875400499188987,
    0.07570449768455667466,
    0.076377867672080736706,
    0.076600711917999656445,
];

const K41_GAUSS_WEIGHTS: [f64; 10] = [
    0.017614007139152118312,
    0.040601429800386941331,
    0.06267204833410906357,
    0.083276741576704748725,
    0.10193011981724043504,
    0.11819453196151841731,
    0.1316886384491766269,
    0.14209610931838205133,
    0.14917298647260374679,
    0.1527533871307258507,
];

const K51_NODES: [f64; 25] = [
    0.99926210499260983419,
    0.99555696979049809791,
    0.98803579453407724764,
    0.9766639214595175115,
    0.96161498642584251242,
    0.94297457122897433941,
    0.92074711528170156175,
    0.89499199787827536885,
    0.86584706529327559545,
    0.83344262876083400142,
    0.79787379799850005941,
    0.75925926303735763058,
    0.71776640681308438819,
    0.67356636847346836449,
    0.62681009901031741279,
    0.57766293024122296772,
    0.5263252843347191826,
    0.47300273144571496052,
    0.41788538219303774885,
    0.36117230580938783774,
    0.30308953893110783017,
    0.24386688372098843205,
    0.18371893942104889202,
    0.12286469261071039639,
    0.061544483005685078887,
];

const K51_KRONROD_WEIGHTS: [f64; 26] = [
    0.0019873838923303159265,
    0.005561932135356713758,
    0.0094739733861741516072,
    0.013236229195571674814,
    0.016847817709128298232,
    0.020435371145882835457,
    0.02400994560695321622,
    0.027475317587851737803,
    0.030792300167387488891,
    0.034002130274329337837,
    0.03711627148341554356,
    0.040083825504032382075,
    0.042872845020170049477,
    0.04550291304992178891,
    0.047982537138836713906,
    0.050277679080715671963,
    0.052362885806407475864,
    0.054251129888545490145,
    0.055950811220412317308,
    0.057437116361567832854,
    0.058689680022394207962,
    0.059720340324174059979,
    0.060539455376045862945,
    0.061128509717053048306,
    0.061471189871425316662,
    0.061580818067832935079,
];

const K51_GAUSS_WEIGHTS: [f64; 13] = [
    0.011393798501026287948,
    0.026354986615032137262,
    0.040939156701306312656,
    0.054904695975835191926,
    0.068038333812356917207,
    0.080140700335001018013,
    0.091028261982963649811,
    0.1005359490670506442,
    0.10851962447426365312,
    0.11485825914571164834,
    0.11945576353578477223,
    0.12224244299031004169,
    0.1231760537267154512,
];

const K61_NODES: [f64; 30] = [
    0.99948441005049063757,
    0.99689348407464954027,
    0.99163099687040459486,
    0.98366812327974720997,
    0.97311632250112626837,
    0.96002186496830751222,
    0.94437444474855997942,
    0.92620004742927432588,
    0.90557330769990779855,
    0.88256053579205268154,
    0.85720523354606109896,
    0.82956576238276839744,
    0.79972783582183908301,
    0.76777743210482619492,
    0.73379006245322680473,
    0.69785049479331579693,
    0.66006106412662696137,
    0.62052618298924286114,
    0.57934523582636169176,
    0.53662414814201989926,
    0.49248046786177857499,
    0.44703376953808917678,
    0.40040125483039439254,
    0.35270472553087811347,
    0.30407320227362507737,
    0.25463692616788984644,
    0.20452511668230989144,
    0.15386991360858354696,
    0.10280693796673703015,
    0.051471842555317695833,
];

const K61_KRONROD_WEIGHTS: [f64; 31] = [
    0.0013890136986770076246,
    0.0038904611270998840513,
    0.0066307039159312921733,
    0.0092732796595177634284,
    0.011823015253496341742,
    0.014369729507045804812,
    0.016920889189053272628,
    0.019414141193942381173,
    0.021828035821609192297,
    0.024191162078080601366,
    0.026509954882333101611,
    0.028754048765041292844,
    0.030907257562387762473,
    0.032981447057483726032,
    0.034979338028060024137,
    0.036882364651821229224,
    0.03867894562472759295,
    0.040374538951535959112,
    0.041969810215164246147,
    0.043452539701356069317,
    0.044814800133162663192,
    0.046059238271006988116,
    0.047185546569299153945,
    0.048185861757087129141,
    0.049055434555029778888,
    0.049795683427074206358,
    0.050405921402782346841,
    0.050881795898749606492,
    0.051221547849258772171,
    0.051426128537459025934,
    0.051494729429451567558,
];

const K61_GAUSS_WEIGHTS: [f64; 15] = [
    0.0079681924961666056155,
    0.018466468311090959142,
    0.02878470788332336935,
    0.038799192569627049597,
    0.048402672830594052903,
    0.057493156217619066482,
    0.065974229882180495128,
    0.073755974737705206268,
    0.080755895229420215355,
    0.086899787201082979802,
    0.092122522237786128718,
    0.096368737174644259639,
    0.099593420586795267063,
    0.1017623897484055046,
    0.10285265289355884034,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub enum GaussKronrodOrder {
    Kronrod15,
    Kronrod21,
    Kronrod31,
    Kronrod41,
    Kronrod51,
    Kronrod61,
}

impl GaussKronrodOrder {
    pub const ALL: [GaussKronrodOrder; 6] = [
        GaussKronrodOrder::Kronrod15,
        GaussKronrodOrder::Kronrod21,
        GaussKronrodOrder::Kronrod31,
        GaussKronrodOrder::Kronrod41,
        GaussKronrodOrder::Kronrod51,
        GaussKronrodOrder::Kronrod61,
    ];

    pub fn order(&self) -> u32 {
        match self {
            GaussKronrodOrder::Kronrod15 => 15,
            GaussKronrodOrder::Kronrod21 => 21,
            GaussKronrodOrder::Kronrod31 => 31,
            GaussKronrodOrder::Kronrod41 => 41,
            GaussKronrodOrder::Kronrod51 => 51,
            GaussKronrodOrder::Kronrod61 => 61,
        }
    }

    pub fn table(&self) -> &'static GaussKronrodTable {
        match self {
            GaussKronrodOrder::Kronrod15 => &KRONROD15,
            GaussKronrodOrder::Kronrod21 => &KRONROD21,
            GaussKronrodOrder::Kronrod31 => &KRONROD31,
            GaussKronrodOrder::Kronrod41 => &KRONROD41,
            GaussKronrodOrder::Kronrod51 => &KRONROD51,
            GaussKronrodOrder::Kronrod61 => &KRONROD61,
        }
    }
}

impl Default for GaussKronrodOrder {
    fn default() -> Self {
        GaussKronrodOrder::Kronrod15
    }
}

impl TryFrom<u32> for GaussKronrodOrder {
    type Error = IntegrationError;

    fn try_from(order: u32) -> Result<Self, Self::Error> {
        match order {
            15 => Ok(GaussKronrodOrder::Kronrod15),
            21 => Ok(GaussKronrodOrder::Kronrod21),
            31 => Ok(GaussKronrodOrder::Kronrod31),
            41 => Ok(GaussKronrodOrder::Kronrod41),
            51 => Ok(GaussKronrodOrder::Kronrod51),
            61 => Ok(GaussKronrodOrder::Kronrod61),
            _ => Err(IntegrationError::UnsupportedRuleOrder(order)),
        }
    }
}

pub struct GaussKronrodTable {
    order: u32,
    nodes: &'static [f64],
    kronrod_weights: &'static [f64],
    gauss_weights: &'static [f64],
}

static KRONROD15: GaussKronrodTable = GaussKronrodTable::new(15, &K15_NODES, &K15_KRONROD_WEIGHTS, &K15_GAUSS_WEIGHTS);
static KRONROD21: GaussKronrodTable = GaussKronrodTable::new(21, &K21_NODES, &K21_KRONROD_WEIGHTS, &K21_GAUSS_WEIGHTS);
static KRONROD31: GaussKronrodTable = GaussKronrodTable::new(31, &K31_NODES, &K31_KRONROD_WEIGHTS, &K31_GAUSS_WEIGHTS);
static KRONROD41: GaussKronrodTable = GaussKronrodTable::new(41, &K41_NODES, &K41_KRONROD_WEIGHTS, &K41_GAUSS_WEIGHTS);
static KRONROD51: GaussKronrodTable = GaussKronrodTable::new(51, &K51_NODES, &K51_KRONROD_WEIGHTS, &K51_GAUSS_WEIGHTS);
static KRONROD61: GaussKronrodTable = GaussKronrodTable::new(61, &K61_NODES, &K61_KRONROD_WEIGHTS, &K61_GAUSS_WEIGHTS);

impl GaussKronrodTable {
    const fn new(
        order: u32,
        nodes: &'static [f64],
        kronrod_weights: &'static [f64],
        gauss_weights: &'static [f64],
    ) -> GaussKronrodTable {
        GaussKronrodTable {
            order,
            nodes,
            kronrod_weights,
            gauss_weights,
        }
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// 正節點 (0, 1]，遞減
    pub fn evaluation_points(&self) -> &'static [f64] {
        self.nodes
    }

    /// 對稱權重，最後一個為中心權重
    pub fn kronrod_weights(&self) -> &'static [f64] {
        self.kronrod_weights
    }

    pub fn gauss_weights(&self) -> &'static [f64] {
        self.gauss_weights
    }

    pub fn center_kronrod_weight(&self) -> f64 {
        self.kronrod_weights[self.nodes.len()]
    }

    /// 嵌入的 Gauss 規則點數 n = (order − 1) / 2
    pub fn gauss_point_count(&self) -> usize {
        self.nodes.len()
    }

    /// Gauss 規則點數為奇數時自帶中心節點
    pub fn gauss_has_center(&self) -> bool {
        self.gauss_point_count() % 2 == 1
    }

    pub fn center_gauss_weight(&self) -> Option<f64> {
        if self.gauss_has_center() {
            self.gauss_weights.last().copied()
        } else {
            None
        }
    }

    /// 每個 panel 的函數求值次數 2k + 1
    pub fn evaluations_per_panel(&self) -> usize {
        2 * self.nodes.len() + 1
    }
}
