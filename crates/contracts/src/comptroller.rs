//! Comptroller interface definitions.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IComptroller {
        function enterMarkets(address[] cTokens) external returns (uint256[]);
        function exitMarket(address cTokenAddress) external returns (uint256);
        function getAccountLiquidity(address account) external view returns (uint256 errorCode, uint256 liquidity, uint256 shortfall);
        function getAssetsIn(address account) external view returns (address[]);
    }
}
